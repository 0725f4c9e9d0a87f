//! JSON exporter for scrapes

use super::exporter::Exporter;
use crate::comment::{CommentStats, UnifiedComment};
use crate::error::Result;
use crate::scrape::{Scrape, CURRENT_SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

/// JSON exporter with compact mode support
pub struct JsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
    /// Format name
    name: String,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new(compact: bool) -> Self {
        Self {
            pretty: !compact,
            name: if compact {
                "json-compact".to_string()
            } else {
                "json".to_string()
            },
        }
    }

    /// Create a compact JSON exporter
    pub fn compact() -> Self {
        Self::new(true)
    }

    /// Create a pretty-printed JSON exporter
    pub fn pretty() -> Self {
        Self::new(false)
    }
}

impl Exporter for JsonExporter {
    fn export(&self, scrape: &Scrape) -> Result<String> {
        let data = ExportData::from_scrape(scrape);

        let json = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };

        Ok(json)
    }

    fn format_name(&self) -> &str {
        &self.name
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Exported data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    /// Schema version
    pub version: String,
    /// Scrape ID
    pub scrape_id: String,
    /// Source platform (short name)
    pub platform: String,
    /// Link the scrape was triggered with
    pub link: String,
    /// Unix timestamp of the scrape
    pub scraped_at: i64,
    /// Summary statistics
    pub stats: CommentStats,
    /// The full comment list in traversal order
    pub comments: Vec<UnifiedComment>,
}

impl ExportData {
    /// Create from a scrape
    pub fn from_scrape(scrape: &Scrape) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION.to_string(),
            scrape_id: scrape.id.to_string(),
            platform: scrape.source.platform().to_short_string().to_string(),
            link: scrape.source.link().to_string(),
            scraped_at: scrape.created_at.timestamp(),
            stats: scrape.stats(),
            comments: scrape.comments.clone(),
        }
    }
}
