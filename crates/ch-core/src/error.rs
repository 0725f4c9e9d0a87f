//! Error types for comment-harvester

use crate::types::Platform;
use thiserror::Error;

/// Main error type for comment-harvester
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Link matches no known platform pattern
    #[error("Unsupported link: {0}")]
    UnsupportedLink(String),

    /// Network or protocol failure inside a transport adapter
    #[error("{platform} transport error: {message}")]
    Transport {
        platform: Platform,
        message: String,
    },

    /// Authentication or authorization failure inside a transport adapter
    #[error("{platform} authentication failed: {message}")]
    Auth {
        platform: Platform,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Scrape not found
    #[error("Scrape not found: {0}")]
    ScrapeNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<HarvesterError>,
    },
}

impl HarvesterError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        HarvesterError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a transport error for a platform
    pub fn transport(platform: Platform, message: impl Into<String>) -> Self {
        HarvesterError::Transport {
            platform,
            message: message.into(),
        }
    }

    /// Build an auth error for a platform
    pub fn auth(platform: Platform, message: impl Into<String>) -> Self {
        HarvesterError::Auth {
            platform,
            message: message.into(),
        }
    }
}

/// Result type alias for comment-harvester
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvesterError::ScrapeNotFound("20250101120000-abcd1234".to_string());
        assert_eq!(
            err.to_string(),
            "Scrape not found: 20250101120000-abcd1234"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = HarvesterError::transport(Platform::Reddit, "HTTP 429");
        assert_eq!(err.to_string(), "Reddit transport error: HTTP 429");
    }

    #[test]
    fn test_auth_error_display() {
        let err = HarvesterError::auth(Platform::Instagram, "bad credentials");
        assert_eq!(
            err.to_string(),
            "Instagram authentication failed: bad credentials"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = HarvesterError::Validation("empty message".to_string());
        let err = err.with_context("Failed to normalize record");
        assert!(err.to_string().contains("Failed to normalize record"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HarvesterError = io_err.into();
        assert!(matches!(err, HarvesterError::Io(_)));
    }
}
