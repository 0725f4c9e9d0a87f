//! ch-adapters - Transport adapters for comment-harvester
//!
//! This crate owns all network behavior: detecting which platform a link
//! belongs to and fetching that platform's raw comment records. Adapters are
//! synchronous and single-pass; one call produces one finite, ordered
//! sequence of raw records (an empty sequence when the resource has zero
//! comments). Normalization lives in `ch-core`.

pub mod adapter;
pub mod detection;

pub use adapter::{CommentSource, RedditSource, YoutubeApiSource, YoutubeWebSource};
pub use adapter::instagram::InstagramSource;
pub use detection::{detect_link, DetectedLink, ScrapeTarget};
