pub mod adapter;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod normalize;
pub mod overlay;
pub mod page;
pub mod readiness;
mod retry;

pub use adapter::{known_store_ids, resolve, AdapterVariant, SiteAdapter};
pub use engine::{scrape_store, EngineConfig};
pub use error::{ErrorKind, PageError, ScrapeError, StoreScrapeError};
pub use extract::RawProductNode;
#[cfg(feature = "chrome")]
pub use page::ChromePage;
pub use page::{HtmlPage, Page, WaitPolicy};
