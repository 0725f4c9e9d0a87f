//! Instagram adapter
//!
//! Logs in through the web login endpoint (the mobile app API is not worth
//! the device-signing dance), converts the post shortcode into a media id,
//! then pages the media comments endpoint. Credentials are supplied per
//! scrape and never stored.

use super::{http_client, target_mismatch, transport_error, CommentSource, BROWSER_USER_AGENT};
use crate::detection::ScrapeTarget;
use ch_core::comment::{InstagramComment, RawComment};
use ch_core::error::{HarvesterError, Result};
use ch_core::types::Platform;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

const BASE_URL: &str = "https://www.instagram.com/";
const LOGIN_URL: &str = "https://www.instagram.com/api/v1/web/accounts/login/ajax/";
const COMMENTS_URL: &str = "https://i.instagram.com/api/v1/media";

/// Web app id Instagram expects on API requests
const IG_APP_ID: &str = "936619743392459";

/// Base64url alphabet Instagram uses for media shortcodes
const SHORTCODE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

lazy_static! {
    static ref CSRF_TOKEN: Regex = Regex::new(r#""csrf_token":"([^"]+)""#).expect("valid regex");
}

/// Comment source backed by the Instagram web API
#[derive(Debug)]
pub struct InstagramSource {
    client: reqwest::blocking::Client,
    username: String,
    password: String,
    max_pages: usize,
}

impl InstagramSource {
    /// Create a new Instagram source with login credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client(Platform::Instagram, BROWSER_USER_AGENT)?,
            username: username.into(),
            password: password.into(),
            max_pages: 20,
        })
    }

    /// Set the maximum number of comment pages fetched per scrape
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Prime the CSRF cookie and log in
    fn login(&self) -> Result<String> {
        let html = self
            .client
            .get(BASE_URL)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| transport_error(Platform::Instagram, e))?;

        let csrf = CSRF_TOKEN
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| {
                HarvesterError::transport(Platform::Instagram, "could not obtain CSRF token")
            })?;

        let epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        // Plaintext envelope; the endpoint accepts it when the timestamp is
        // current
        let enc_password = format!("#PWD_INSTAGRAM_BROWSER:0:{}:{}", epoch, self.password);

        let response = self
            .client
            .post(LOGIN_URL)
            .header("X-CSRFToken", &csrf)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", BASE_URL)
            .form(&[
                ("username", self.username.as_str()),
                ("enc_password", enc_password.as_str()),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .map_err(|e| transport_error(Platform::Instagram, e))?;

        let status = response.status();
        let result: LoginResponse = response
            .json()
            .map_err(|e| transport_error(Platform::Instagram, e))?;

        if !result.authenticated {
            let reason = if result.user {
                "wrong password".to_string()
            } else if status.as_u16() == 400 {
                "login rejected (checkpoint or rate limit)".to_string()
            } else {
                format!("unknown user (HTTP {})", status.as_u16())
            };
            return Err(HarvesterError::auth(Platform::Instagram, reason));
        }

        Ok(csrf)
    }

    fn fetch_page(&self, media_id: u64, min_id: Option<&str>) -> Result<CommentsResponse> {
        let mut url = format!(
            "{}/{}/comments/?can_support_threading=true&permalink_enabled=false",
            COMMENTS_URL, media_id
        );
        if let Some(min_id) = min_id {
            url.push_str("&min_id=");
            url.push_str(min_id);
        }

        let response = self
            .client
            .get(&url)
            .header("X-IG-App-ID", IG_APP_ID)
            .header("Referer", BASE_URL)
            .send()
            .map_err(|e| transport_error(Platform::Instagram, e))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(HarvesterError::auth(
                Platform::Instagram,
                format!("session rejected (HTTP {})", status.as_u16()),
            ));
        }
        if !status.is_success() {
            return Err(HarvesterError::transport(
                Platform::Instagram,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        response
            .json::<CommentsResponse>()
            .map_err(|e| transport_error(Platform::Instagram, e))
    }
}

impl CommentSource for InstagramSource {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn describe(&self) -> String {
        format!("Instagram web API as {}", self.username)
    }

    fn fetch(&self, target: &ScrapeTarget) -> Result<Vec<RawComment>> {
        let shortcode = match target {
            ScrapeTarget::InstagramPost { shortcode } => shortcode,
            other => return Err(target_mismatch(Platform::Instagram, other)),
        };

        let media_id = shortcode_to_media_id(shortcode)?;
        self.login()?;

        let mut raw = Vec::new();
        let mut min_id: Option<String> = None;

        for page in 0..self.max_pages {
            let response = self.fetch_page(media_id, min_id.as_deref())?;
            debug!(
                "instagram page {} returned {} comments",
                page,
                response.comments.len()
            );

            raw.extend(response.comments.into_iter().map(|c| {
                RawComment::Instagram(InstagramComment {
                    username: c.user.map(|u| u.username),
                    text: c.text,
                    created_at: c.created_at,
                    like_count: c.comment_like_count,
                })
            }));

            min_id = response.next_min_id;
            if min_id.is_none() {
                break;
            }
        }

        Ok(raw)
    }
}

/// Decode a post shortcode into its numeric media id
///
/// Shortcodes are the media id in a base64url-style alphabet. Codes longer
/// than 11 characters belong to private-account media and do not decode.
pub fn shortcode_to_media_id(shortcode: &str) -> Result<u64> {
    if shortcode.is_empty() || shortcode.len() > 11 {
        return Err(HarvesterError::Validation(format!(
            "not a public post shortcode: {}",
            shortcode
        )));
    }

    let mut id: u64 = 0;
    for ch in shortcode.chars() {
        let index = SHORTCODE_ALPHABET.find(ch).ok_or_else(|| {
            HarvesterError::Validation(format!("invalid shortcode character: {}", ch))
        })?;
        id = id
            .checked_mul(64)
            .and_then(|n| n.checked_add(index as u64))
            .ok_or_else(|| {
                HarvesterError::Validation(format!("shortcode out of range: {}", shortcode))
            })?;
    }
    Ok(id)
}

// Wire types

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    user: bool,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<WireComment>,
    next_min_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireComment {
    user: Option<WireUser>,
    text: Option<String>,
    created_at: Option<i64>,
    comment_like_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shortcode_decodes_to_media_id() {
        assert_eq!(shortcode_to_media_id("B").unwrap(), 1);
        assert_eq!(
            shortcode_to_media_id("BQ0eAlwhDrw").unwrap(),
            1_455_920_561_485_265_648
        );
        assert_eq!(
            shortcode_to_media_id("CxGUJgBNqoy").unwrap(),
            3_190_325_999_824_185_906
        );
    }

    #[test]
    fn test_shortcode_rejects_invalid_input() {
        assert!(shortcode_to_media_id("").is_err());
        assert!(shortcode_to_media_id("has space").is_err());
        // Private-account media codes are longer than 11 characters
        assert!(shortcode_to_media_id("CxGUJgBNqoyXYZ").is_err());
    }

    #[test]
    fn test_parse_comments_page() {
        let json = r#"{
            "comments": [
                {
                    "pk": "18001234567890123",
                    "user": {"pk": 123, "username": "grace"},
                    "text": "so cool",
                    "created_at": 1700000000,
                    "comment_like_count": 5
                },
                {
                    "pk": "18001234567890124",
                    "text": "orphaned",
                    "created_at": 1700000100
                }
            ],
            "next_min_id": "QWERTY=="
        }"#;

        let page: CommentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.comments.len(), 2);
        assert_eq!(page.comments[0].user.as_ref().unwrap().username, "grace");
        assert!(page.comments[1].user.is_none());
        assert_eq!(page.next_min_id.as_deref(), Some("QWERTY=="));
    }

    #[test]
    fn test_parse_last_page() {
        let page: CommentsResponse = serde_json::from_str(r#"{"comments": []}"#).unwrap();
        assert!(page.comments.is_empty());
        assert!(page.next_min_id.is_none());
    }

    #[test]
    fn test_login_response_shapes() {
        let ok: LoginResponse =
            serde_json::from_str(r#"{"authenticated": true, "user": true}"#).unwrap();
        assert!(ok.authenticated);

        let bad: LoginResponse =
            serde_json::from_str(r#"{"authenticated": false, "user": true, "status": "ok"}"#)
                .unwrap();
        assert!(!bad.authenticated);
        assert!(bad.user);
    }

    #[test]
    fn test_fetch_rejects_wrong_target() {
        let source = InstagramSource::new("user", "pass").unwrap();
        let result = source.fetch(&ScrapeTarget::YoutubeVideo {
            video_id: "dQw4w9WgXcQ".to_string(),
        });
        assert!(matches!(result, Err(HarvesterError::Validation(_))));
    }
}
