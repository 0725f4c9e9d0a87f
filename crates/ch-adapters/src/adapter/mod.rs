//! Transport adapter module
//!
//! One adapter per platform fetch method. Each adapter turns a scrape target
//! into a finite, ordered sequence of raw comment records; retry, backoff,
//! and login behavior all live inside the adapter that needs them.

pub mod instagram;
pub mod reddit;
pub mod youtube_api;
pub mod youtube_web;

pub use reddit::RedditSource;
pub use youtube_api::YoutubeApiSource;
pub use youtube_web::YoutubeWebSource;

use crate::detection::ScrapeTarget;
use ch_core::comment::RawComment;
use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use std::time::Duration;

/// Request timeout applied to every adapter client
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like User-Agent for the web-scrape endpoints
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Trait for comment transport adapters
pub trait CommentSource: std::fmt::Debug {
    /// The platform this adapter fetches from
    fn platform(&self) -> Platform;

    /// Human-readable description of the fetch method
    fn describe(&self) -> String;

    /// Fetch all raw comments for a target
    ///
    /// Blocks on network I/O. Returns an empty sequence (not an error) when
    /// the resource has zero comments; any transport or auth failure fails
    /// the whole scrape with no partial result.
    fn fetch(&self, target: &ScrapeTarget) -> Result<Vec<RawComment>>;
}

/// Build a blocking HTTP client for an adapter
pub(crate) fn http_client(platform: Platform, user_agent: &str) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .cookie_store(true)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| HarvesterError::transport(platform, e.to_string()))
}

/// Map a reqwest error into the platform's transport error
pub(crate) fn transport_error(platform: Platform, err: reqwest::Error) -> HarvesterError {
    HarvesterError::transport(platform, err.to_string())
}

/// Mismatched adapter/target pairing is a programming error surfaced as
/// validation, not transport
pub(crate) fn target_mismatch(platform: Platform, target: &ScrapeTarget) -> HarvesterError {
    HarvesterError::Validation(format!(
        "{} adapter cannot fetch target {:?}",
        platform, target
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_mismatch_error() {
        let err = target_mismatch(
            Platform::Reddit,
            &ScrapeTarget::YoutubeVideo {
                video_id: "dQw4w9WgXcQ".to_string(),
            },
        );
        assert!(matches!(err, HarvesterError::Validation(_)));
        assert!(err.to_string().contains("Reddit"));
    }
}
