//! YouTube Data API adapter
//!
//! Pages through `commentThreads.list` with an API key. Replies ride along
//! inside each thread item (`part=snippet,replies`), so one pass over the
//! pages yields the full thread structure.

use super::{http_client, target_mismatch, transport_error, CommentSource};
use crate::detection::ScrapeTarget;
use ch_core::comment::{RawComment, YoutubeApiComment};
use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use serde::Deserialize;
use tracing::debug;

const API_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";

/// Comment source backed by the YouTube Data API v3
#[derive(Debug)]
pub struct YoutubeApiSource {
    client: reqwest::blocking::Client,
    api_key: String,
    max_pages: usize,
    page_size: u32,
}

impl YoutubeApiSource {
    /// Create a new API source with the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client(
                Platform::Youtube,
                concat!("comment-harvester/", env!("CARGO_PKG_VERSION")),
            )?,
            api_key: api_key.into(),
            max_pages: 20,
            page_size: 100,
        })
    }

    /// Set the maximum number of pages fetched per scrape
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the thread count requested per page (API maximum is 100)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.min(100);
        self
    }

    fn fetch_page(&self, video_id: &str, page_token: Option<&str>) -> Result<ThreadListResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("part", "snippet,replies".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", self.page_size.to_string()),
            ("textFormat", "plainText".to_string()),
            ("order", "relevance".to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(API_URL)
            .query(&query)
            .send()
            .map_err(|e| transport_error(Platform::Youtube, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            if body.contains("commentsDisabled") {
                return Err(HarvesterError::transport(
                    Platform::Youtube,
                    "comments are disabled for this video",
                ));
            }
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(HarvesterError::auth(
                    Platform::Youtube,
                    format!("API key rejected (HTTP {})", status.as_u16()),
                ));
            }
            return Err(HarvesterError::transport(
                Platform::Youtube,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        response
            .json::<ThreadListResponse>()
            .map_err(|e| transport_error(Platform::Youtube, e))
    }
}

impl CommentSource for YoutubeApiSource {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn describe(&self) -> String {
        "YouTube Data API".to_string()
    }

    fn fetch(&self, target: &ScrapeTarget) -> Result<Vec<RawComment>> {
        let video_id = match target {
            ScrapeTarget::YoutubeVideo { video_id } => video_id,
            other => return Err(target_mismatch(Platform::Youtube, other)),
        };

        let mut raw = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..self.max_pages {
            let response = self.fetch_page(video_id, page_token.as_deref())?;
            debug!(
                "youtube api page {} returned {} threads",
                page,
                response.items.len()
            );

            raw.extend(response.items.into_iter().map(map_thread));

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(raw)
    }
}

fn map_thread(thread: CommentThread) -> RawComment {
    let mut top = map_resource(thread.snippet.top_level_comment);
    top.replies = thread
        .replies
        .map(|r| r.comments.into_iter().map(map_resource).collect())
        .unwrap_or_default();
    RawComment::YoutubeApi(top)
}

fn map_resource(resource: CommentResource) -> YoutubeApiComment {
    YoutubeApiComment {
        author: resource.snippet.author_display_name,
        text: resource.snippet.text_display,
        published_at: resource.snippet.published_at,
        like_count: resource.snippet.like_count,
        replies: Vec::new(),
    }
}

// Wire types for commentThreads.list

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadListResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: ThreadSnippet,
    replies: Option<ThreadReplies>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: CommentResource,
}

#[derive(Debug, Deserialize)]
struct ThreadReplies {
    #[serde(default)]
    comments: Vec<CommentResource>,
}

#[derive(Debug, Deserialize)]
struct CommentResource {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: Option<String>,
    text_display: Option<String>,
    published_at: Option<String>,
    like_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_PAGE: &str = r#"{
        "nextPageToken": "QURTSl9p",
        "items": [
            {
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": "carol",
                            "textDisplay": "great video",
                            "publishedAt": "2023-11-14T22:13:20Z",
                            "likeCount": 12
                        }
                    },
                    "totalReplyCount": 1
                },
                "replies": {
                    "comments": [
                        {
                            "snippet": {
                                "authorDisplayName": "dave",
                                "textDisplay": "agreed",
                                "publishedAt": "2023-11-15T01:00:00Z",
                                "likeCount": 2
                            }
                        }
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_thread_list_page() {
        let page: ThreadListResponse = serde_json::from_str(SAMPLE_PAGE).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9p"));
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_map_thread_carries_replies() {
        let page: ThreadListResponse = serde_json::from_str(SAMPLE_PAGE).unwrap();
        let raw = map_thread(page.items.into_iter().next().unwrap());

        let RawComment::YoutubeApi(top) = raw else {
            panic!("expected YoutubeApi raw comment");
        };
        assert_eq!(top.author.as_deref(), Some("carol"));
        assert_eq!(top.like_count, Some(12));
        assert_eq!(top.replies.len(), 1);
        assert_eq!(top.replies[0].author.as_deref(), Some("dave"));
    }

    #[test]
    fn test_parse_empty_page() {
        // A video with zero comments returns no items and no page token
        let page: ThreadListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_fetch_rejects_wrong_target() {
        let source = YoutubeApiSource::new("test-key").unwrap();
        let result = source.fetch(&ScrapeTarget::RedditPost {
            url: "https://www.reddit.com/r/rust/comments/abc123".to_string(),
        });
        assert!(matches!(result, Err(HarvesterError::Validation(_))));
    }

    #[test]
    fn test_page_size_clamped_to_api_maximum() {
        let source = YoutubeApiSource::new("test-key").unwrap().with_page_size(500);
        assert_eq!(source.page_size, 100);
    }
}
