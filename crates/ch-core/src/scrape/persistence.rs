//! Scrape storage trait and abstractions

use super::model::{Scrape, ScrapeInfo};
use crate::error::Result;
use crate::types::ScrapeId;

/// Trait for scrape storage implementations
pub trait ScrapeStorage: Send + Sync {
    /// Save a scrape
    fn save(&self, scrape: &Scrape) -> Result<()>;

    /// Load a scrape by ID
    fn load(&self, id: &ScrapeId) -> Result<Scrape>;

    /// List all scrapes (as info)
    fn list(&self) -> Result<Vec<ScrapeInfo>>;

    /// Delete a scrape
    fn delete(&self, id: &ScrapeId) -> Result<()>;

    /// Check if a scrape exists
    fn exists(&self, id: &ScrapeId) -> bool;

    /// Get the latest scrape (by updated_at)
    fn latest(&self) -> Result<Option<Scrape>> {
        let scrapes = self.list()?;
        if scrapes.is_empty() {
            return Ok(None);
        }

        let latest_info = scrapes
            .into_iter()
            .max_by_key(|s| s.updated_at)
            .expect("Non-empty list should have max");

        self.load(&latest_info.id).map(Some)
    }
}
