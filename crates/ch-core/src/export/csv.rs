//! CSV exporter for scrapes

use super::exporter::Exporter;
use crate::comment::UnifiedComment;
use crate::error::Result;
use crate::scrape::Scrape;

/// Fixed column header for comment exports
pub const CSV_HEADER: &str = "author,message,timestamp,is_reply,parent_author,like_count";

/// CSV exporter with RFC 4180 quoting
///
/// Null fields serialize as empty; timestamps in canonical RFC 3339 UTC.
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CSV exporter
    pub fn new() -> Self {
        Self
    }

    fn render_row(comment: &UnifiedComment) -> String {
        let like_count = comment
            .like_count
            .map(|n| n.to_string())
            .unwrap_or_default();

        [
            escape_field(comment.author.as_deref().unwrap_or("")),
            escape_field(&comment.message),
            escape_field(&comment.timestamp_string()),
            escape_field(if comment.is_reply { "true" } else { "false" }),
            escape_field(comment.parent_author.as_deref().unwrap_or("")),
            escape_field(&like_count),
        ]
        .join(",")
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn export(&self, scrape: &Scrape) -> Result<String> {
        let mut out = String::new();
        out.push_str(CSV_HEADER);
        out.push('\n');

        for comment in &scrape.comments {
            out.push_str(&Self::render_row(comment));
            out.push('\n');
        }

        Ok(out)
    }

    fn format_name(&self) -> &str {
        "csv"
    }

    fn file_extension(&self) -> &str {
        "csv"
    }
}

/// Quote a field when it contains the delimiter, a quote, or a line break;
/// embedded quotes double
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
