//! ch-core - Core library for comment-harvester
//!
//! This crate provides the core business logic for the Multi-Platform Comment
//! Harvester: raw and unified comment models, normalization, statistics,
//! scrape management, and export functionality. It performs no network I/O;
//! the transport adapters live in `ch-adapters`.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod scrape;
pub mod export;

pub use error::{HarvesterError, Result};
pub use types::*;
