//! Reddit adapter
//!
//! Reddit exposes every post as JSON by appending `.json` to its URL, no
//! authentication required. The response is a two-element array: the post
//! listing and the comment listing. Comment children of kind `t1` form the
//! reply tree; `more` stubs are ignored (single linear pass, no follow-up
//! requests).

use super::{http_client, target_mismatch, transport_error, CommentSource};
use crate::detection::ScrapeTarget;
use ch_core::comment::{RawComment, RedditComment};
use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Comment source backed by Reddit's public JSON endpoint
#[derive(Debug)]
pub struct RedditSource {
    client: reqwest::blocking::Client,
}

impl RedditSource {
    /// Create a new Reddit source with the given User-Agent
    ///
    /// Reddit throttles generic agents hard; callers should pass something
    /// project-specific.
    pub fn new(user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: http_client(Platform::Reddit, user_agent)?,
        })
    }
}

impl CommentSource for RedditSource {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn describe(&self) -> String {
        "Reddit JSON endpoint".to_string()
    }

    fn fetch(&self, target: &ScrapeTarget) -> Result<Vec<RawComment>> {
        let url = match target {
            ScrapeTarget::RedditPost { url } => url,
            other => return Err(target_mismatch(Platform::Reddit, other)),
        };

        let json_url = format!("{}.json?raw_json=1", url.trim_end_matches('/'));
        let response = self
            .client
            .get(&json_url)
            .send()
            .map_err(|e| transport_error(Platform::Reddit, e))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(HarvesterError::transport(
                Platform::Reddit,
                "rate limited (HTTP 429)",
            ));
        }
        if !status.is_success() {
            return Err(HarvesterError::transport(
                Platform::Reddit,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let listings: Vec<Listing> = response
            .json()
            .map_err(|e| transport_error(Platform::Reddit, e))?;

        // listings[0] is the post itself, listings[1] the comment tree
        let Some(comments) = listings.into_iter().nth(1) else {
            return Err(HarvesterError::transport(
                Platform::Reddit,
                "post response had no comment listing",
            ));
        };

        let mut raw = Vec::new();
        for child in comments.data.children {
            if child.kind != "t1" {
                continue;
            }
            match serde_json::from_value::<RedditComment>(child.data) {
                Ok(comment) => raw.push(RawComment::Reddit(comment)),
                Err(e) => debug!("skipping undecodable reddit child: {}", e),
            }
        }

        Ok(raw)
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    #[serde(default)]
    kind: String,
    data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_POST: &str = r#"[
        {
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t3", "data": {"title": "Some post", "author": "op"}}
                ]
            }
        },
        {
            "kind": "Listing",
            "data": {
                "children": [
                    {
                        "kind": "t1",
                        "data": {
                            "author": "bob",
                            "body": " hello world",
                            "created_utc": 1700000000.0,
                            "score": 42,
                            "replies": {
                                "data": {
                                    "children": [
                                        {
                                            "kind": "t1",
                                            "data": {
                                                "author": "amy",
                                                "body": "hi",
                                                "created_utc": 1700000100.0,
                                                "replies": ""
                                            }
                                        }
                                    ]
                                }
                            }
                        }
                    },
                    {"kind": "more", "data": {"count": 7, "children": ["k1", "k2"]}}
                ]
            }
        }
    ]"#;

    fn parse_children(json: &str) -> Vec<RawComment> {
        let listings: Vec<Listing> = serde_json::from_str(json).unwrap();
        let comments = listings.into_iter().nth(1).unwrap();
        comments
            .data
            .children
            .into_iter()
            .filter(|c| c.kind == "t1")
            .filter_map(|c| serde_json::from_value::<RedditComment>(c.data).ok())
            .map(RawComment::Reddit)
            .collect()
    }

    #[test]
    fn test_parse_post_listings() {
        let raw = parse_children(SAMPLE_POST);
        // One t1 top-level comment; the "more" stub is dropped
        assert_eq!(raw.len(), 1);

        let RawComment::Reddit(top) = &raw[0] else {
            panic!("expected Reddit raw comment");
        };
        assert_eq!(top.author.as_deref(), Some("bob"));
        assert_eq!(top.score, Some(42));
        assert_eq!(top.replies.len(), 1);
        assert_eq!(top.replies[0].author.as_deref(), Some("amy"));
    }

    #[test]
    fn test_parse_post_with_zero_comments() {
        let json = r#"[
            {"kind": "Listing", "data": {"children": []}},
            {"kind": "Listing", "data": {"children": []}}
        ]"#;
        assert!(parse_children(json).is_empty());
    }

    #[test]
    fn test_fetch_rejects_wrong_target() {
        let source = RedditSource::new("test-agent/0.1").unwrap();
        let result = source.fetch(&ScrapeTarget::YoutubeVideo {
            video_id: "dQw4w9WgXcQ".to_string(),
        });
        assert!(matches!(result, Err(HarvesterError::Validation(_))));
    }
}
