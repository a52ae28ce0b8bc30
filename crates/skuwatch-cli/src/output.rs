//! Plain-text rendering of run results.

use skuwatch_core::StoresFile;
use skuwatch_scraper::resolve;

use crate::check::{StoreOutcome, StoreReport};

const TITLE_WIDTH: usize = 70;
const PRICE_WIDTH: usize = 12;

pub(crate) fn render_reports(reports: &[StoreReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("{} ({})\n", report.store_name, report.store_id));
        match &report.outcome {
            StoreOutcome::Products(records) => {
                out.push_str(&format!(
                    "  {:<TITLE_WIDTH$}  {:>PRICE_WIDTH$}  AVAILABILITY\n",
                    "TITLE", "PRICE"
                ));
                for record in records {
                    out.push_str(&format!(
                        "  {:<TITLE_WIDTH$}  {:>PRICE_WIDTH$}  {}\n",
                        record.title,
                        record.price.to_string(),
                        record.availability
                    ));
                }
            }
            StoreOutcome::NoMatches => {
                out.push_str("  no matching products\n");
            }
            StoreOutcome::Failed(err) => {
                out.push_str(&format!("  failed: {}: {}\n", err.kind, err.message));
            }
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render_store_list(stores: &StoresFile) -> String {
    let mut out = String::new();
    for profile in &stores.stores {
        let adapter = if resolve(&profile.id).is_ok() {
            "adapter"
        } else {
            "no adapter"
        };
        out.push_str(&format!(
            "{:<16} {:<3} {:<4} {:<24} {adapter}\n",
            profile.id,
            profile.region.as_deref().unwrap_or("-"),
            profile.currency().code(),
            profile.name,
        ));
    }
    out
}
