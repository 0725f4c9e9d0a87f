//! Scrape data models

use crate::comment::{CommentStats, UnifiedComment};
use crate::types::{Platform, ScrapeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current scrape file schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// One harvesting run and its normalized result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scrape {
    /// Unique scrape identifier
    pub id: ScrapeId,
    /// When the scrape ran
    pub created_at: DateTime<Utc>,
    /// When the scrape record was last written
    pub updated_at: DateTime<Utc>,
    /// Where the comments came from
    pub source: ScrapeSource,
    /// Normalized comments in adapter traversal order
    pub comments: Vec<UnifiedComment>,
    /// Scrape metadata
    #[serde(default)]
    pub metadata: ScrapeMetadata,
}

impl Scrape {
    /// Create a new scrape from an adapter's normalized output
    pub fn new(source: ScrapeSource, comments: Vec<UnifiedComment>) -> Self {
        let now = Utc::now();
        Self {
            id: ScrapeId::generate(),
            created_at: now,
            updated_at: now,
            source,
            comments,
            metadata: ScrapeMetadata::default(),
        }
    }

    /// Create a new scrape with a specific ID
    pub fn with_id(id: ScrapeId, source: ScrapeSource, comments: Vec<UnifiedComment>) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            source,
            comments,
            metadata: ScrapeMetadata::default(),
        }
    }

    /// Mark the scrape record as updated
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Number of comments in this scrape
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Compute summary statistics for this scrape
    pub fn stats(&self) -> CommentStats {
        CommentStats::compute(&self.comments)
    }

    /// Get scrape info summary
    pub fn info(&self) -> ScrapeInfo {
        ScrapeInfo::from(self)
    }
}

/// Where a scrape's comments came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapeSource {
    /// YouTube Data API
    YoutubeApi {
        /// 11-character video ID
        video_id: String,
        /// Original link as entered
        link: String,
    },
    /// YouTube watch-page scrape (InnerTube)
    YoutubeWeb {
        /// 11-character video ID
        video_id: String,
        /// Original link as entered
        link: String,
    },
    /// Instagram post
    Instagram {
        /// Post shortcode
        shortcode: String,
        /// Original link as entered
        link: String,
    },
    /// Reddit post
    Reddit {
        /// Canonical post URL
        link: String,
    },
}

impl ScrapeSource {
    /// The platform this source belongs to
    pub fn platform(&self) -> Platform {
        match self {
            ScrapeSource::YoutubeApi { .. } | ScrapeSource::YoutubeWeb { .. } => Platform::Youtube,
            ScrapeSource::Instagram { .. } => Platform::Instagram,
            ScrapeSource::Reddit { .. } => Platform::Reddit,
        }
    }

    /// The link the scrape was triggered with
    pub fn link(&self) -> &str {
        match self {
            ScrapeSource::YoutubeApi { link, .. }
            | ScrapeSource::YoutubeWeb { link, .. }
            | ScrapeSource::Instagram { link, .. }
            | ScrapeSource::Reddit { link } => link,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> String {
        match self {
            ScrapeSource::YoutubeApi { video_id, .. } => {
                format!("YouTube video {} (Data API)", video_id)
            }
            ScrapeSource::YoutubeWeb { video_id, .. } => {
                format!("YouTube video {} (web scrape)", video_id)
            }
            ScrapeSource::Instagram { shortcode, .. } => format!("Instagram post {}", shortcode),
            ScrapeSource::Reddit { link } => format!("Reddit post {}", link),
        }
    }
}

/// Scrape metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeMetadata {
    /// Optional scrape name
    pub name: Option<String>,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ScrapeMetadata {
    /// Create new metadata with a name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Scrape summary information (for listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeInfo {
    /// Scrape ID
    pub id: ScrapeId,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Source platform
    pub platform: Platform,
    /// Source description
    pub source_description: String,
    /// Number of comments
    pub comment_count: usize,
    /// Scrape metadata
    pub metadata: ScrapeMetadata,
}

impl From<&Scrape> for ScrapeInfo {
    fn from(scrape: &Scrape) -> Self {
        Self {
            id: scrape.id.clone(),
            created_at: scrape.created_at,
            updated_at: scrape.updated_at,
            platform: scrape.source.platform(),
            source_description: scrape.source.description(),
            comment_count: scrape.comment_count(),
            metadata: scrape.metadata.clone(),
        }
    }
}

/// On-disk scrape envelope carrying the schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeFile {
    /// Schema version of the stored scrape
    pub schema_version: String,
    /// The scrape itself
    pub scrape: Scrape,
}

impl ScrapeFile {
    /// Wrap a scrape with the current schema version
    pub fn new(scrape: Scrape) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            scrape,
        }
    }

    /// Unwrap the scrape, rejecting an incompatible major version
    pub fn into_scrape(self) -> crate::Result<Scrape> {
        let major = self.schema_version.split('.').next().unwrap_or("");
        let current_major = CURRENT_SCHEMA_VERSION.split('.').next().unwrap_or("");
        if major != current_major {
            return Err(crate::HarvesterError::UnsupportedSchemaVersion(
                self.schema_version,
            ));
        }
        Ok(self.scrape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::UnifiedComment;
    use pretty_assertions::assert_eq;

    fn create_test_scrape() -> Scrape {
        Scrape::new(
            ScrapeSource::Reddit {
                link: "https://www.reddit.com/r/rust/comments/abc123".to_string(),
            },
            vec![UnifiedComment::new("Hello")],
        )
    }

    #[test]
    fn test_scrape_creation() {
        let scrape = create_test_scrape();
        assert_eq!(scrape.comment_count(), 1);
        assert!(scrape.created_at <= scrape.updated_at);
        assert_eq!(scrape.source.platform(), Platform::Reddit);
    }

    #[test]
    fn test_scrape_with_id() {
        let id = ScrapeId::generate();
        let scrape = Scrape::with_id(
            id.clone(),
            ScrapeSource::YoutubeApi {
                video_id: "dQw4w9WgXcQ".to_string(),
                link: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            },
            vec![],
        );
        assert_eq!(scrape.id, id);
        assert_eq!(scrape.comment_count(), 0);
    }

    #[test]
    fn test_scrape_touch() {
        let mut scrape = create_test_scrape();
        let old_updated = scrape.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        scrape.touch();
        assert!(scrape.updated_at > old_updated);
    }

    #[test]
    fn test_source_description() {
        let source = ScrapeSource::YoutubeApi {
            video_id: "dQw4w9WgXcQ".to_string(),
            link: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(source.description(), "YouTube video dQw4w9WgXcQ (Data API)");
        assert_eq!(source.platform(), Platform::Youtube);

        let source = ScrapeSource::Instagram {
            shortcode: "CxGUJgBNqoy".to_string(),
            link: "https://www.instagram.com/p/CxGUJgBNqoy/".to_string(),
        };
        assert_eq!(source.description(), "Instagram post CxGUJgBNqoy");
    }

    #[test]
    fn test_scrape_metadata() {
        let metadata = ScrapeMetadata::with_name("launch video").with_tag("campaign");
        assert_eq!(metadata.name, Some("launch video".to_string()));
        assert!(metadata.tags.contains(&"campaign".to_string()));
    }

    #[test]
    fn test_scrape_info_from_scrape() {
        let scrape = create_test_scrape();
        let info = scrape.info();
        assert_eq!(info.id, scrape.id);
        assert_eq!(info.comment_count, 1);
        assert_eq!(info.platform, Platform::Reddit);
    }

    #[test]
    fn test_scrape_file_version_check() {
        let file = ScrapeFile::new(create_test_scrape());
        assert_eq!(file.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(file.clone().into_scrape().is_ok());

        let mut incompatible = file;
        incompatible.schema_version = "2.0".to_string();
        assert!(matches!(
            incompatible.into_scrape(),
            Err(crate::HarvesterError::UnsupportedSchemaVersion(_))
        ));
    }

    #[test]
    fn test_scrape_serialization() {
        let scrape = create_test_scrape();
        let json = serde_json::to_string(&ScrapeFile::new(scrape.clone())).unwrap();
        let file: ScrapeFile = serde_json::from_str(&json).unwrap();
        let loaded = file.into_scrape().unwrap();
        assert_eq!(loaded.id, scrape.id);
        assert_eq!(loaded.comments, scrape.comments);
    }
}
