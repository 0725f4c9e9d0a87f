//! Unified comment data model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A platform-agnostic comment record
///
/// Constructed once by the normalizer and immutable afterwards. `message` is
/// always non-empty; every other field is optional depending on what the
/// source platform exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedComment {
    /// Comment author, when the source provides one
    pub author: Option<String>,
    /// Message body, trimmed, first visible character uppercased
    pub message: String,
    /// Timezone-aware creation instant, when the source provides one
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether this comment is nested under another comment
    #[serde(default)]
    pub is_reply: bool,
    /// Author of the parent comment, only when `is_reply` is true and the
    /// source exposes thread structure
    pub parent_author: Option<String>,
    /// Like/upvote count, only where the source reports engagement
    pub like_count: Option<u64>,
}

impl UnifiedComment {
    /// Create a top-level comment with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            author: None,
            message: message.into(),
            timestamp: None,
            is_reply: false,
            parent_author: None,
            like_count: None,
        }
    }

    /// Canonical timestamp serialization (RFC 3339 UTC), empty when absent
    pub fn timestamp_string(&self) -> String {
        self.timestamp
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }

    /// Message length in characters (not bytes)
    pub fn message_chars(&self) -> usize {
        self.message.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_comment() {
        let comment = UnifiedComment::new("Hello");
        assert_eq!(comment.message, "Hello");
        assert!(!comment.is_reply);
        assert!(comment.author.is_none());
        assert!(comment.timestamp.is_none());
    }

    #[test]
    fn test_timestamp_string() {
        let mut comment = UnifiedComment::new("Hi");
        assert_eq!(comment.timestamp_string(), "");

        comment.timestamp = Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap());
        assert_eq!(comment.timestamp_string(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_message_chars_counts_unicode() {
        let comment = UnifiedComment::new("Héllo");
        assert_eq!(comment.message_chars(), 5);
    }

    #[test]
    fn test_serialization_round_trip() {
        let comment = UnifiedComment {
            author: Some("bob".to_string()),
            message: "Hello world".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()),
            is_reply: true,
            parent_author: Some("amy".to_string()),
            like_count: Some(3),
        };

        let json = serde_json::to_string(&comment).unwrap();
        let comment2: UnifiedComment = serde_json::from_str(&json).unwrap();
        assert_eq!(comment, comment2);
    }
}
