//! Export functionality for scrapes
//!
//! This module provides exporters for converting scrapes to delimited text
//! and JSON.
//!
//! # Overview
//!
//! Export functionality supports:
//! - CSV with the fixed column header
//!   `author,message,timestamp,is_reply,parent_author,like_count`
//! - JSON format (compact and pretty-printed)
//!
//! # Example
//!
//! ```ignore
//! use ch_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let csv = manager.export(&scrape, "csv")?;
//! let json = manager.export(&scrape, "json")?;
//! ```

mod csv;
mod exporter;
mod json;

pub use csv::CsvExporter;
pub use exporter::{ExportManager, Exporter};
pub use json::{ExportData, JsonExporter};
