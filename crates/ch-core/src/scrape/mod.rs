//! Scrape lifecycle: model, persistence abstraction, and manager
//!
//! A scrape is one harvesting run: the link it was triggered with, which
//! platform adapter ran, and the normalized comments it produced. Scrapes are
//! persisted as JSON so they can be listed and re-exported later.

pub mod manager;
pub mod model;
pub mod persistence;

pub use manager::ScrapeManager;
pub use model::{
    Scrape, ScrapeFile, ScrapeInfo, ScrapeMetadata, ScrapeSource, CURRENT_SCHEMA_VERSION,
};
pub use persistence::ScrapeStorage;
