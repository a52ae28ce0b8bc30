//! Conversion from raw listing text into [`skuwatch_core::ProductRecord`]
//! fields.
//!
//! Every function here is total: malformed input degrades to
//! [`Price::Unavailable`] or [`AvailabilityStatus::Unknown`], never a panic
//! or an error.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use skuwatch_core::{AvailabilityStatus, Currency, Money, Price, ProductRecord, StoreProfile};

use crate::extract::RawProductNode;

/// Longest title emitted in a [`ProductRecord`], ellipsis included.
pub const TITLE_MAX_CHARS: usize = 70;

pub const ELLIPSIS: char = '…';

/// A run of digits with optional grouping/decimal separators, e.g. `1,299.99`.
/// Whitespace (including no-break spaces) is accepted as a thousands
/// separator only between the leading digits and a following 3-digit
/// group, as in `1 299,99 $`.
static NUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.?[0-9]+(?:\s[0-9]{3}\b)*[0-9.,]*").expect("valid regex")
});

const OUT_OF_STOCK_PHRASES: &[&str] = &[
    "out of stock",
    "sold out",
    "unavailable",
    "not available",
    "no longer available",
    "not in stock",
    "coming soon",
    "discontinued",
];

const IN_STOCK_PHRASES: &[&str] = &[
    "add to cart",
    "add to basket",
    "in stock",
    "buy now",
    "available",
    "ships",
    "pick up",
    "pickup",
];

/// Parses listing price text such as `"$1,999.99"` into [`Price`].
///
/// Only the first numeric run is read, so trailing promo text
/// (`"$1,299.99 - Save 10%"`) does not leak into the amount. Space-grouped
/// thousands (`"1 299,99 $"`) are read as one number. Returns
/// [`Price::Unavailable`] for absent text, text without digits, and numbers
/// that cannot be a price (`"1.2.3"`, more than two decimals).
#[must_use]
pub fn normalize_price(raw: Option<&str>, currency: Currency) -> Price {
    raw.and_then(|text| NUMERIC_RUN.find(text))
        .and_then(|run| {
            let run: String = run.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            parse_amount(&run)
        })
        .and_then(|amount| Money::new(amount, currency))
        .map_or(Price::Unavailable, Price::Amount)
}

/// Maps availability text to [`AvailabilityStatus`].
///
/// Negative phrasings are checked first so `"Unavailable"` does not match
/// the positive `"available"`. Absent or unrecognised text is
/// [`AvailabilityStatus::Unknown`].
#[must_use]
pub fn normalize_availability(raw: Option<&str>) -> AvailabilityStatus {
    let Some(raw) = raw else {
        return AvailabilityStatus::Unknown;
    };
    let text = collapse_whitespace(raw).to_lowercase();
    if text.is_empty() {
        return AvailabilityStatus::Unknown;
    }

    if OUT_OF_STOCK_PHRASES.iter().any(|p| text.contains(p)) {
        AvailabilityStatus::OutOfStock
    } else if IN_STOCK_PHRASES.iter().any(|p| text.contains(p)) {
        AvailabilityStatus::InStock
    } else {
        AvailabilityStatus::Unknown
    }
}

/// Shortens `raw` to at most `max` characters.
///
/// Titles within the limit are returned unchanged. Longer titles are cut at
/// the last whitespace that leaves room for the trailing [`ELLIPSIS`], or
/// hard-cut when there is none. The result never exceeds `max` characters,
/// which makes the function idempotent.
#[must_use]
pub fn truncate_title(raw: &str, max: usize) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= max {
        return raw.to_owned();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let boundary = chars[..=budget]
        .iter()
        .rposition(|c| c.is_whitespace())
        .filter(|&idx| chars[..idx].iter().any(|c| !c.is_whitespace()));

    let body: String = match boundary {
        Some(idx) => chars[..idx].iter().collect(),
        None => chars[..budget].iter().collect(),
    };

    let mut out = body.trim_end().to_owned();
    out.push(ELLIPSIS);
    out
}

/// Trims and collapses internal whitespace runs to single spaces.
#[must_use]
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the output record for one filtered candidate.
#[must_use]
pub fn normalize_node(node: &RawProductNode, profile: &StoreProfile) -> ProductRecord {
    ProductRecord {
        title: truncate_title(&node.title_text, TITLE_MAX_CHARS),
        price: normalize_price(node.price_text.as_deref(), profile.currency()),
        availability: normalize_availability(node.availability_text.as_deref()),
        store_id: profile.id.clone(),
        region: profile.region.clone(),
    }
}

/// Interprets a numeric run with either `,` or `.` as the decimal mark.
///
/// - Both present: the later one is the decimal mark (`1,299.99`, `1.299,99`).
/// - Only commas: a single comma followed by one or two digits is a decimal
///   mark (`849,99`); otherwise commas group thousands (`1,299`).
/// - Only dots: a single dot is the decimal mark; several are rejected.
///
/// Grouped digits must come in threes after the first group.
fn parse_amount(run: &str) -> Option<Decimal> {
    let run = run.trim_end_matches(['.', ',']);
    if run.is_empty() {
        return None;
    }

    let last_dot = run.rfind('.');
    let last_comma = run.rfind(',');

    let (integer, fraction) = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            let decimal_at = dot.max(comma);
            (&run[..decimal_at], Some(&run[decimal_at + 1..]))
        }
        (None, Some(comma)) => {
            let tail = &run[comma + 1..];
            if run.matches(',').count() == 1 && (1..=2).contains(&tail.len()) {
                (&run[..comma], Some(tail))
            } else {
                (run, None)
            }
        }
        (Some(dot), None) => {
            if run.matches('.').count() > 1 {
                return None;
            }
            (&run[..dot], Some(&run[dot + 1..]))
        }
        (None, None) => (run, None),
    };

    let integer = strip_grouping(integer)?;
    let mut canonical = if integer.is_empty() {
        "0".to_owned()
    } else {
        integer
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        canonical.push('.');
        canonical.push_str(fraction);
    }

    Decimal::from_str(&canonical).ok()
}

/// Removes thousands separators, validating 3-digit groups.
fn strip_grouping(integer: &str) -> Option<String> {
    let groups: Vec<&str> = integer.split([',', '.']).collect();
    let (first, rest) = groups.split_first()?;

    if !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !rest.is_empty() && (first.is_empty() || first.len() > 3) {
        return None;
    }
    if rest
        .iter()
        .any(|g| g.len() != 3 || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    Some(groups.concat())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
