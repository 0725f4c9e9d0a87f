//! Scrape manager for CRUD operations

use super::model::{Scrape, ScrapeInfo, ScrapeMetadata, ScrapeSource};
use super::persistence::ScrapeStorage;
use crate::comment::UnifiedComment;
use crate::error::{HarvesterError, Result};
use crate::types::ScrapeId;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Manager for scrape lifecycle
pub struct ScrapeManager {
    /// Storage backend
    storage: Arc<dyn ScrapeStorage>,
}

impl ScrapeManager {
    /// Create a new scrape manager with the given storage
    pub fn new(storage: impl ScrapeStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Create a new scrape manager with shared storage
    pub fn with_storage(storage: Arc<dyn ScrapeStorage>) -> Self {
        Self { storage }
    }

    /// Create and persist a new scrape
    pub fn create(&self, source: ScrapeSource, comments: Vec<UnifiedComment>) -> Result<Scrape> {
        let scrape = Scrape::new(source, comments);
        self.storage.save(&scrape)?;
        Ok(scrape)
    }

    /// Create and persist a new scrape with metadata
    pub fn create_with_metadata(
        &self,
        source: ScrapeSource,
        comments: Vec<UnifiedComment>,
        metadata: ScrapeMetadata,
    ) -> Result<Scrape> {
        let mut scrape = Scrape::new(source, comments);
        scrape.metadata = metadata;
        self.storage.save(&scrape)?;
        Ok(scrape)
    }

    /// Load a scrape by ID
    pub fn load(&self, id: &ScrapeId) -> Result<Scrape> {
        self.storage.load(id)
    }

    /// Load the most recently updated scrape
    pub fn load_latest(&self) -> Result<Option<Scrape>> {
        self.storage.latest()
    }

    /// Save a scrape
    pub fn save(&self, scrape: &mut Scrape) -> Result<()> {
        scrape.touch();
        self.storage.save(scrape)
    }

    /// List all scrapes, most recently updated first
    pub fn list(&self) -> Result<Vec<ScrapeInfo>> {
        let mut scrapes = self.storage.list()?;
        scrapes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(scrapes)
    }

    /// Delete a scrape
    pub fn delete(&self, id: &ScrapeId) -> Result<()> {
        self.storage.delete(id)
    }

    /// Clean up scrapes older than the given date
    pub fn clean(&self, before: DateTime<Utc>) -> Result<usize> {
        let scrapes = self.storage.list()?;
        let mut deleted = 0;

        for info in scrapes {
            if info.updated_at < before {
                if self.storage.delete(&info.id).is_ok() {
                    deleted += 1;
                }
            }
        }

        Ok(deleted)
    }

    /// Check if a scrape exists
    pub fn exists(&self, id: &ScrapeId) -> bool {
        self.storage.exists(id)
    }

    /// Get scrape count
    pub fn count(&self) -> Result<usize> {
        Ok(self.storage.list()?.len())
    }

    /// Resolve a user-supplied ID string, failing with a not-found error
    pub fn resolve(&self, id: &str) -> Result<Scrape> {
        let id = ScrapeId::from_string(id)?;
        if !self.storage.exists(&id) {
            return Err(HarvesterError::ScrapeNotFound(id.to_string()));
        }
        self.storage.load(&id)
    }

    /// Get access to the underlying storage
    pub fn storage(&self) -> &dyn ScrapeStorage {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::persistence::memory::MemoryStorage;

    fn test_source() -> ScrapeSource {
        ScrapeSource::Reddit {
            link: "https://www.reddit.com/r/rust/comments/abc123".to_string(),
        }
    }

    #[test]
    fn test_create_and_load() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        let scrape = manager
            .create(test_source(), vec![UnifiedComment::new("Hello")])
            .unwrap();

        let loaded = manager.load(&scrape.id).unwrap();
        assert_eq!(loaded.comment_count(), 1);
    }

    #[test]
    fn test_create_with_metadata() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        let scrape = manager
            .create_with_metadata(
                test_source(),
                vec![],
                ScrapeMetadata::with_name("my scrape"),
            )
            .unwrap();

        assert_eq!(scrape.metadata.name.as_deref(), Some("my scrape"));
    }

    #[test]
    fn test_list_sorted_by_recency() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        let _first = manager.create(test_source(), vec![]).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = manager.create(test_source(), vec![]).unwrap();

        let list = manager.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
    }

    #[test]
    fn test_load_latest() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        assert!(manager.load_latest().unwrap().is_none());

        let _first = manager.create(test_source(), vec![]).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = manager.create(test_source(), vec![]).unwrap();

        let latest = manager.load_latest().unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[test]
    fn test_clean_old_scrapes() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        let scrape = manager.create(test_source(), vec![]).unwrap();

        // Nothing older than the epoch of its own creation
        let deleted = manager.clean(scrape.created_at).unwrap();
        assert_eq!(deleted, 0);

        std::thread::sleep(std::time::Duration::from_millis(10));
        let deleted = manager.clean(Utc::now()).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(manager.count().unwrap(), 0);
    }

    #[test]
    fn test_resolve_invalid_id() {
        let manager = ScrapeManager::new(MemoryStorage::new());
        assert!(manager.resolve("not-a-scrape-id").is_err());
        assert!(manager.resolve("20240101120000-deadbeef").is_err());
    }
}
