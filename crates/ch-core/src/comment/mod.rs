//! Comment models and normalization
//!
//! This module contains the unified comment entity, the platform-native raw
//! record shapes, the normalizer that maps one into the other, and summary
//! statistics over normalized batches.

pub mod model;
pub mod normalize;
pub mod raw;
pub mod stats;

pub use model::UnifiedComment;
pub use normalize::{
    epoch_to_timestamp, parse_timestamp, parse_vote_count, polish_message, Normalizer,
};
pub use raw::{
    InstagramComment, RawComment, RedditComment, YoutubeApiComment, YoutubeWebComment,
};
pub use stats::{CommentStats, HistogramBucket, TimeHistogram};
