//! Configuration management for comment-harvester

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube settings
    pub youtube: YoutubeConfig,
    /// Instagram settings
    pub instagram: InstagramConfig,
    /// Reddit settings
    pub reddit: RedditConfig,
    /// Normalization settings
    pub normalize: NormalizeConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube: YoutubeConfig::default(),
            instagram: InstagramConfig::default(),
            reddit: RedditConfig::default(),
            normalize: NormalizeConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// YouTube-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Data API key (can also come from the YOUTUBE_API_KEY env var)
    pub api_key: Option<String>,
    /// Default fetch method ("api" or "web")
    pub method: String,
    /// Maximum comment pages fetched per scrape
    pub max_pages: usize,
    /// Comment threads per API page (API maximum is 100)
    pub page_size: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            method: "api".to_string(),
            max_pages: 20,
            page_size: 100,
        }
    }
}

/// Instagram-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramConfig {
    /// Login username (password is always prompted or passed per scrape)
    pub username: Option<String>,
    /// Maximum comment pages fetched per scrape
    pub max_pages: usize,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            username: None,
            max_pages: 20,
        }
    }
}

/// Reddit-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// User-Agent sent to the Reddit JSON endpoint
    pub user_agent: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("comment-harvester/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Maximum reply nesting depth walked before skipping nodes
    pub max_reply_depth: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            max_reply_depth: 64,
        }
    }
}

/// Export and presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Rows shown in the terminal preview table
    pub preview_rows: usize,
    /// Bins in the comment-activity histogram
    pub histogram_bins: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "csv".to_string(),
            preview_rows: 50,
            histogram_bins: 20,
        }
    }
}
