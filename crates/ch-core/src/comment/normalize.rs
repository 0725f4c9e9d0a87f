//! Comment normalization
//!
//! Maps platform-native raw records into [`UnifiedComment`]s. One raw record
//! produces at most one unified record per node it contains; nodes without a
//! decodable, non-empty message body are skipped without affecting their
//! siblings. Output order is the adapter's traversal order, never re-sorted.

use super::model::UnifiedComment;
use super::raw::{
    InstagramComment, RawComment, RedditComment, YoutubeApiComment, YoutubeWebComment,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Default bound on reply-tree nesting walked per record
pub const DEFAULT_MAX_REPLY_DEPTH: usize = 64;

/// Normalizer for raw comment batches
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_reply_depth: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with the default depth guard
    pub fn new() -> Self {
        Self {
            max_reply_depth: DEFAULT_MAX_REPLY_DEPTH,
        }
    }

    /// Set the maximum reply nesting depth walked before skipping nodes
    pub fn with_max_reply_depth(mut self, depth: usize) -> Self {
        self.max_reply_depth = depth;
        self
    }

    /// Normalize a whole batch, preserving record order
    ///
    /// Never fails: malformed records are skipped and partial results are
    /// always returned.
    pub fn normalize_all(&self, records: &[RawComment]) -> Vec<UnifiedComment> {
        let mut out = Vec::new();
        for record in records {
            out.extend(self.normalize(record));
        }
        out
    }

    /// Normalize one raw record
    ///
    /// Tree-shaped records (Reddit, YouTube API) expand into one unified
    /// comment per tree node; flat records produce zero or one.
    pub fn normalize(&self, record: &RawComment) -> Vec<UnifiedComment> {
        let unified = match record {
            RawComment::YoutubeApi(comment) => self.flatten(comment),
            RawComment::Reddit(comment) => self.flatten(comment),
            RawComment::YoutubeWeb(comment) => unify_youtube_web(comment).into_iter().collect(),
            RawComment::Instagram(comment) => unify_instagram(comment).into_iter().collect(),
        };

        if unified.is_empty() {
            debug!("skipped raw record with no decodable message body");
        }
        unified
    }

    /// Depth-first flattening of a reply tree with an explicit stack
    ///
    /// Visits every node exactly once and preserves sibling order. Nodes
    /// nested deeper than the guard are skipped along with their subtrees.
    fn flatten<T: ReplyNode>(&self, root: &T) -> Vec<UnifiedComment> {
        let mut out = Vec::new();
        let mut over_depth = 0usize;
        let mut stack: Vec<(&T, Option<&str>, usize)> = vec![(root, None, 0)];

        while let Some((node, parent_author, depth)) = stack.pop() {
            if depth > self.max_reply_depth {
                over_depth += 1;
                continue;
            }

            if let Some(mut comment) = node.unify() {
                comment.is_reply = depth > 0;
                if depth > 0 {
                    comment.parent_author = parent_author.map(str::to_string);
                }
                out.push(comment);
            }

            // Children pushed in reverse so pop order keeps sibling order
            for child in node.children().iter().rev() {
                stack.push((child, node.author(), depth + 1));
            }
        }

        if over_depth > 0 {
            debug!(
                "skipped {} reply subtrees beyond depth {}",
                over_depth, self.max_reply_depth
            );
        }
        out
    }
}

/// A raw record shape that may carry nested replies
trait ReplyNode: Sized {
    fn author(&self) -> Option<&str>;
    fn children(&self) -> &[Self];
    fn unify(&self) -> Option<UnifiedComment>;
}

impl ReplyNode for YoutubeApiComment {
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.replies
    }

    fn unify(&self) -> Option<UnifiedComment> {
        let message = polish_message(self.text.as_deref()?)?;
        Some(UnifiedComment {
            author: clean_author(self.author.as_deref()),
            message,
            timestamp: self.published_at.as_deref().and_then(parse_timestamp),
            is_reply: false,
            parent_author: None,
            like_count: self.like_count,
        })
    }
}

impl ReplyNode for RedditComment {
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.replies
    }

    fn unify(&self) -> Option<UnifiedComment> {
        let message = polish_message(self.body.as_deref()?)?;
        Some(UnifiedComment {
            author: clean_author(self.author.as_deref()),
            message,
            timestamp: self.created_utc.and_then(epoch_to_timestamp),
            is_reply: false,
            parent_author: None,
            // Scores can go negative; engagement is only reported when it
            // fits the non-negative contract
            like_count: self.score.and_then(|s| u64::try_from(s).ok()),
        })
    }
}

fn unify_youtube_web(comment: &YoutubeWebComment) -> Option<UnifiedComment> {
    let message = polish_message(comment.text.as_deref()?)?;
    Some(UnifiedComment {
        author: clean_author(comment.author.as_deref()),
        message,
        // Relative phrases like "2 years ago" fail the parse and stay None
        timestamp: comment.time.as_deref().and_then(parse_timestamp),
        is_reply: comment.reply,
        parent_author: if comment.reply {
            comment.parent_author.clone()
        } else {
            None
        },
        like_count: comment.votes.as_deref().and_then(parse_vote_count),
    })
}

fn unify_instagram(comment: &InstagramComment) -> Option<UnifiedComment> {
    let message = polish_message(comment.text.as_deref()?)?;
    Some(UnifiedComment {
        author: clean_author(comment.username.as_deref()),
        message,
        timestamp: comment
            .created_at
            .and_then(|secs| epoch_to_timestamp(secs as f64)),
        is_reply: false,
        parent_author: None,
        like_count: comment.like_count,
    })
}

fn clean_author(author: Option<&str>) -> Option<String> {
    let author = author?.trim();
    if author.is_empty() {
        None
    } else {
        Some(author.to_string())
    }
}

/// Trim a message body and uppercase its first visible character
///
/// Returns `None` for empty-after-trim input. A first character whose
/// uppercase expansion is multi-character expands in place. Idempotent.
pub fn polish_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    if first.is_uppercase() {
        return Some(trimmed.to_string());
    }

    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    Some(out)
}

/// Parse a platform timestamp string into a UTC instant
///
/// Accepts RFC 3339 / ISO 8601, `YYYY-MM-DD HH:MM:SS`, bare dates, and
/// stringified epoch seconds. Anything else (including relative phrases)
/// yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if let Ok(epoch) = value.parse::<f64>() {
        return epoch_to_timestamp(epoch);
    }

    None
}

/// Convert Unix epoch seconds into a UTC instant
pub fn epoch_to_timestamp(epoch_seconds: f64) -> Option<DateTime<Utc>> {
    if !epoch_seconds.is_finite() {
        return None;
    }
    let secs = epoch_seconds.floor();
    let nanos = ((epoch_seconds - secs) * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Parse a display vote count ("387", "1,234", "1.2K", "3M") into an
/// approximate integer count
pub fn parse_vote_count(raw: &str) -> Option<u64> {
    let value = raw.trim().replace(',', "");
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        'K' | 'k' => (&value[..value.len() - 1], 1_000.0),
        'M' | 'm' => (&value[..value.len() - 1], 1_000_000.0),
        'B' | 'b' => (&value[..value.len() - 1], 1_000_000_000.0),
        _ => (value.as_str(), 1.0),
    };

    let number: f64 = digits.parse().ok()?;
    if number < 0.0 {
        return None;
    }
    Some((number * multiplier).round() as u64)
}
