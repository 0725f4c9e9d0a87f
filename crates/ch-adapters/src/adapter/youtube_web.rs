//! YouTube web-scrape adapter (InnerTube)
//!
//! Works without an API key: fetches the watch page, lifts the InnerTube API
//! key and the comments continuation token out of the embedded player config,
//! then pages `youtubei/v1/next` the way the browser does. Comment entities
//! arrive as `commentEntityPayload` mutations carrying display-formatted
//! fields (relative times, "1.2K" vote counts); those stay raw here.

use super::{http_client, target_mismatch, transport_error, CommentSource, BROWSER_USER_AGENT};
use crate::detection::ScrapeTarget;
use ch_core::comment::{RawComment, YoutubeWebComment};
use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;

const INNERTUBE_URL: &str = "https://www.youtube.com/youtubei/v1/next";
const FALLBACK_CLIENT_VERSION: &str = "2.20240101.00.00";

lazy_static! {
    static ref INNERTUBE_API_KEY: Regex =
        Regex::new(r#""INNERTUBE_API_KEY":"([^"]+)""#).expect("valid regex");
    static ref CLIENT_VERSION: Regex =
        Regex::new(r#""clientVersion":"([0-9][0-9.]*)""#).expect("valid regex");
    static ref CONTINUATION_TOKEN: Regex =
        Regex::new(r#""continuationCommand":\{"token":"([^"]+)""#).expect("valid regex");
}

/// Comment source scraping the YouTube web surface
#[derive(Debug)]
pub struct YoutubeWebSource {
    client: reqwest::blocking::Client,
    max_pages: usize,
}

impl YoutubeWebSource {
    /// Create a new web-scrape source
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client(Platform::Youtube, BROWSER_USER_AGENT)?,
            max_pages: 20,
        })
    }

    /// Set the maximum number of continuation pages fetched per scrape
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        self.client
            .get(&url)
            // Skips the EU consent interstitial
            .header("Cookie", "CONSENT=YES+cb")
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| transport_error(Platform::Youtube, e))
    }

    fn fetch_continuation(
        &self,
        api_key: &str,
        client_version: &str,
        token: &str,
    ) -> Result<Value> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": "WEB",
                    "clientVersion": client_version,
                    "hl": "en",
                    "gl": "US",
                }
            },
            "continuation": token,
        });

        self.client
            .post(format!("{}?key={}", INNERTUBE_URL, api_key))
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<Value>())
            .map_err(|e| transport_error(Platform::Youtube, e))
    }
}

impl CommentSource for YoutubeWebSource {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn describe(&self) -> String {
        "YouTube web scrape".to_string()
    }

    fn fetch(&self, target: &ScrapeTarget) -> Result<Vec<RawComment>> {
        let video_id = match target {
            ScrapeTarget::YoutubeVideo { video_id } => video_id,
            other => return Err(target_mismatch(Platform::Youtube, other)),
        };

        let html = self.fetch_watch_page(video_id)?;

        let api_key = INNERTUBE_API_KEY
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| {
                HarvesterError::transport(
                    Platform::Youtube,
                    "could not locate InnerTube API key in watch page",
                )
            })?;
        let client_version = CLIENT_VERSION
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| FALLBACK_CLIENT_VERSION.to_string());

        // The comments section continuation is the last one embedded in the
        // watch page
        let Some(first_token) = CONTINUATION_TOKEN
            .captures_iter(&html)
            .last()
            .map(|caps| caps[1].to_string())
        else {
            debug!("no comments continuation on watch page, assuming zero comments");
            return Ok(Vec::new());
        };

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(first_token.clone());

        let mut raw = Vec::new();
        let mut token = first_token;

        for page in 0..self.max_pages {
            let response = self.fetch_continuation(&api_key, &client_version, &token)?;

            let comments = extract_comments(&response);
            debug!("youtube web page {} yielded {} comments", page, comments.len());
            raw.extend(comments.into_iter().map(RawComment::YoutubeWeb));

            match next_continuation(&response, &seen) {
                Some(next) => {
                    seen.insert(next.clone());
                    token = next;
                }
                None => break,
            }
        }

        Ok(raw)
    }
}

/// Pull comment entities out of an InnerTube response
fn extract_comments(response: &Value) -> Vec<YoutubeWebComment> {
    let Some(mutations) = response
        .pointer("/frameworkUpdates/entityBatchUpdate/mutations")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    mutations
        .iter()
        .filter_map(|mutation| mutation.pointer("/payload/commentEntityPayload"))
        .map(|payload| {
            let reply_level = payload
                .pointer("/properties/replyLevel")
                .and_then(Value::as_u64)
                .unwrap_or(0);

            YoutubeWebComment {
                author: payload
                    .pointer("/author/displayName")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                text: payload
                    .pointer("/properties/content/content")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                time: payload
                    .pointer("/properties/publishedTime")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                votes: payload
                    .pointer("/toolbar/likeCountNotliked")
                    .and_then(Value::as_str)
                    .filter(|v| !v.trim().is_empty())
                    .map(str::to_string),
                reply: reply_level > 0,
                // The entity payload does not carry the parent's author
                parent_author: None,
            }
        })
        .collect()
}

/// Find the first unseen continuation token in a response
///
/// Walked iteratively over the appended-items subtree; the response shape is
/// deeply nested and not worth typing out.
fn next_continuation(response: &Value, seen: &HashSet<String>) -> Option<String> {
    let endpoints = response.get("onResponseReceivedEndpoints")?;

    let mut stack: Vec<&Value> = vec![endpoints];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                if let Some(token) = value
                    .pointer("/continuationCommand/token")
                    .and_then(Value::as_str)
                {
                    if !seen.contains(token) {
                        return Some(token.to_string());
                    }
                }
                stack.extend(map.values());
            }
            Value::Array(items) => stack.extend(items.iter()),
            _ => {}
        }
    }
    None
}
