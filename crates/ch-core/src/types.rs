//! Core type definitions for comment-harvester

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Source platform of a comment scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// YouTube (Data API or web scrape)
    Youtube,
    /// Instagram
    Instagram,
    /// Reddit
    Reddit,
}

impl Platform {
    /// Convert to short string for file names and CLI flags
    pub fn to_short_string(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Reddit => "reddit",
        }
    }

    /// Parse from short string
    pub fn from_short_string(s: &str) -> Option<Self> {
        match s {
            "youtube" | "yt" => Some(Platform::Youtube),
            "instagram" | "ig" => Some(Platform::Instagram),
            "reddit" => Some(Platform::Reddit),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Youtube => write!(f, "YouTube"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Reddit => write!(f, "Reddit"),
        }
    }
}

/// Unique identifier for a scrape
/// Format: YYYYMMDDHHMMSS-<short_uuid>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrapeId(pub String);

impl ScrapeId {
    /// Generate a new ScrapeId
    pub fn generate() -> Self {
        let now = chrono::Utc::now();
        let uuid = Uuid::new_v4();
        let short_uuid = &uuid.to_string()[..8];
        ScrapeId(format!("{}-{}", now.format("%Y%m%d%H%M%S"), short_uuid))
    }

    /// Create from a string with validation
    pub fn from_string(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if Self::validate(&s) {
            Ok(ScrapeId(s))
        } else {
            Err(crate::HarvesterError::Validation(format!(
                "Invalid scrape ID format: {}",
                s
            )))
        }
    }

    /// Validate scrape ID format
    fn validate(s: &str) -> bool {
        // Format: YYYYMMDDHHMMSS-xxxxxxxx
        if s.len() < 23 {
            return false;
        }
        let parts: Vec<&str> = s.splitn(2, '-').collect();
        if parts.len() != 2 {
            return false;
        }
        // Check timestamp part (14 digits)
        parts[0].len() == 14 && parts[0].chars().all(|c| c.is_ascii_digit())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScrapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_short_string() {
        assert_eq!(Platform::Youtube.to_short_string(), "youtube");
        assert_eq!(Platform::Instagram.to_short_string(), "instagram");
        assert_eq!(Platform::Reddit.to_short_string(), "reddit");

        assert_eq!(Platform::from_short_string("youtube"), Some(Platform::Youtube));
        assert_eq!(Platform::from_short_string("yt"), Some(Platform::Youtube));
        assert_eq!(Platform::from_short_string("tiktok"), None);
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Youtube.to_string(), "YouTube");
        assert_eq!(Platform::Reddit.to_string(), "Reddit");
    }

    #[test]
    fn test_scrape_id_generation() {
        let id = ScrapeId::generate();
        assert!(id.0.len() >= 23);
        assert!(id.0.contains('-'));
    }

    #[test]
    fn test_scrape_id_uniqueness() {
        let id1 = ScrapeId::generate();
        let id2 = ScrapeId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_scrape_id_validation() {
        assert!(ScrapeId::from_string("20241231120000-abcd1234").is_ok());
        assert!(ScrapeId::from_string("invalid").is_err());
        assert!(ScrapeId::from_string("2024-abcd1234").is_err());
    }
}
