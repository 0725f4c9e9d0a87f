//! Link detection
//!
//! Maps a user-supplied post/video link onto a platform and a concrete
//! scrape target. A link matching no known pattern is surfaced immediately
//! as an unsupported-input error; there is nothing to retry.

use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YOUTUBE_VIDEO_ID: Regex =
        Regex::new(r"(?:v=|youtu\.be/|/shorts/|/embed/|/live/)([0-9A-Za-z_-]{11})")
            .expect("valid regex");
    static ref INSTAGRAM_SHORTCODE: Regex =
        Regex::new(r"instagram\.com/(?:[^/]+/)?(?:p|reel|reels|tv)/([0-9A-Za-z_-]+)")
            .expect("valid regex");
    static ref REDDIT_POST: Regex =
        Regex::new(r"reddit\.com(/r/[^/\s]+/comments/[0-9a-zA-Z]+)").expect("valid regex");
}

/// Concrete resource a scrape targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeTarget {
    /// A YouTube video
    YoutubeVideo {
        /// 11-character video ID
        video_id: String,
    },
    /// An Instagram post
    InstagramPost {
        /// Post shortcode
        shortcode: String,
    },
    /// A Reddit post
    RedditPost {
        /// Canonical post URL (no query string, no trailing slash)
        url: String,
    },
}

/// Result of link detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLink {
    /// Platform the link belongs to
    pub platform: Platform,
    /// Scrape target extracted from the link
    pub target: ScrapeTarget,
    /// The link as entered
    pub link: String,
}

/// Detect the platform of a link and extract its scrape target
pub fn detect_link(link: &str) -> Result<DetectedLink> {
    let trimmed = link.trim();

    if trimmed.contains("youtube.com") || trimmed.contains("youtu.be") {
        let video_id = YOUTUBE_VIDEO_ID
            .captures(trimmed)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| HarvesterError::UnsupportedLink(trimmed.to_string()))?;
        return Ok(DetectedLink {
            platform: Platform::Youtube,
            target: ScrapeTarget::YoutubeVideo { video_id },
            link: trimmed.to_string(),
        });
    }

    if trimmed.contains("instagram.com") {
        let shortcode = INSTAGRAM_SHORTCODE
            .captures(trimmed)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| HarvesterError::UnsupportedLink(trimmed.to_string()))?;
        return Ok(DetectedLink {
            platform: Platform::Instagram,
            target: ScrapeTarget::InstagramPost { shortcode },
            link: trimmed.to_string(),
        });
    }

    if trimmed.contains("reddit.com") {
        let path = REDDIT_POST
            .captures(trimmed)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| HarvesterError::UnsupportedLink(trimmed.to_string()))?;
        return Ok(DetectedLink {
            platform: Platform::Reddit,
            target: ScrapeTarget::RedditPost {
                url: format!("https://www.reddit.com{}", path),
            },
            link: trimmed.to_string(),
        });
    }

    Err(HarvesterError::UnsupportedLink(trimmed.to_string()))
}
