//! ch-storage - File system persistence for comment-harvester
//!
//! Stores each scrape as one JSON file under the data directory, with atomic
//! writes and tolerant listing.

mod scrape_store;

pub use scrape_store::{default_data_dir, FileSystemStorage};
