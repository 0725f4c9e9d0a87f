//! Platform-native raw comment shapes
//!
//! One variant per transport adapter. Raw records keep whatever the platform
//! hands back (relative time phrases, display-formatted vote counts, nested
//! reply listings); the normalizer owns all cleanup.

use serde::{Deserialize, Deserializer};

/// A raw comment record, tagged by source platform shape
#[derive(Debug, Clone)]
pub enum RawComment {
    /// YouTube Data API commentThreads item
    YoutubeApi(YoutubeApiComment),
    /// YouTube web (InnerTube) comment payload
    YoutubeWeb(YoutubeWebComment),
    /// Instagram media comment
    Instagram(InstagramComment),
    /// Reddit comment node, possibly carrying a nested reply tree
    Reddit(RedditComment),
}

/// Comment as returned by the YouTube Data API
///
/// Thread replies ride along inside the top-level item. The API only nests
/// one level deep, but the type permits arbitrary nesting so the normalizer
/// treats it like any other reply tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeApiComment {
    /// snippet.authorDisplayName
    pub author: Option<String>,
    /// snippet.textDisplay
    pub text: Option<String>,
    /// snippet.publishedAt (RFC 3339)
    pub published_at: Option<String>,
    /// snippet.likeCount
    pub like_count: Option<u64>,
    /// replies.comments
    #[serde(default)]
    pub replies: Vec<YoutubeApiComment>,
}

/// Comment as scraped from the YouTube watch page (InnerTube)
///
/// The web surface reports relative times ("2 years ago") and display-
/// formatted vote counts ("1.2K"); both stay raw here.
#[derive(Debug, Clone, Default)]
pub struct YoutubeWebComment {
    pub author: Option<String>,
    pub text: Option<String>,
    /// Relative published time, e.g. "2 years ago"
    pub time: Option<String>,
    /// Display vote count, e.g. "387" or "1.2K"
    pub votes: Option<String>,
    /// Whether the pager saw this comment inside a reply thread
    pub reply: bool,
    /// Author of the thread's top-level comment, when known
    pub parent_author: Option<String>,
}

/// Comment as returned by the Instagram media comments endpoint
#[derive(Debug, Clone, Default)]
pub struct InstagramComment {
    pub username: Option<String>,
    pub text: Option<String>,
    /// Unix epoch seconds
    pub created_at: Option<i64>,
    pub like_count: Option<u64>,
}

/// Comment node from a Reddit post's JSON listing
///
/// `replies` is a nested tree of arbitrary depth. On the wire Reddit encodes
/// "no replies" as the empty string `""` instead of a listing object; the
/// deserializer accepts both, and drops non-`t1` children (`more` stubs).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditComment {
    pub author: Option<String>,
    pub body: Option<String>,
    /// Unix epoch seconds (float on the wire)
    pub created_utc: Option<f64>,
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_replies")]
    pub replies: Vec<RedditComment>,
}

fn deserialize_replies<'de, D>(deserializer: D) -> Result<Vec<RedditComment>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RepliesField {
        Listing(ReplyListing),
        Empty(String),
    }

    #[derive(Deserialize)]
    struct ReplyListing {
        data: ReplyListingData,
    }

    #[derive(Deserialize)]
    struct ReplyListingData {
        #[serde(default)]
        children: Vec<ReplyChild>,
    }

    #[derive(Deserialize)]
    struct ReplyChild {
        #[serde(default)]
        kind: String,
        data: RedditComment,
    }

    match Option::<RepliesField>::deserialize(deserializer)? {
        Some(RepliesField::Listing(listing)) => Ok(listing
            .data
            .children
            .into_iter()
            .filter(|child| child.kind == "t1")
            .map(|child| child.data)
            .collect()),
        _ => Ok(Vec::new()),
    }
}
