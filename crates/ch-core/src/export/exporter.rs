//! Exporter trait and manager

use crate::error::{HarvesterError, Result};
use crate::scrape::Scrape;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Trait for scrape exporters
pub trait Exporter: Send + Sync {
    /// Export a scrape to string
    fn export(&self, scrape: &Scrape) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        // Register default exporters
        manager.register(Box::new(super::csv::CsvExporter::new()));
        manager.register(Box::new(super::json::JsonExporter::new(false)));
        manager.register(Box::new(super::json::JsonExporter::compact()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export a scrape to the specified format
    pub fn export(&self, scrape: &Scrape, format: &str) -> Result<String> {
        let exporter = self.exporters.get(format).ok_or_else(|| {
            HarvesterError::Validation(format!("Unknown export format: {}", format))
        })?;

        exporter.export(scrape)
    }

    /// Export a scrape to a file
    pub fn export_to_file(&self, scrape: &Scrape, format: &str, path: &Path) -> Result<()> {
        let content = self.export(scrape, format)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Get file extension from exporter
        let exporter = self.exporters.get(format).ok_or_else(|| {
            HarvesterError::Validation(format!("Unknown export format: {}", format))
        })?;

        // Add extension if needed
        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        // Atomic write using temp file
        let temp_path = final_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        fs::rename(&temp_path, &final_path)?;
        Ok(())
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.exporters.contains_key(format)
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ScrapeSource;

    fn create_test_scrape() -> Scrape {
        Scrape::new(
            ScrapeSource::Reddit {
                link: "https://www.reddit.com/r/rust/comments/abc123".to_string(),
            },
            vec![],
        )
    }

    struct TestExporter;

    impl Exporter for TestExporter {
        fn export(&self, _scrape: &Scrape) -> Result<String> {
            Ok("test export".to_string())
        }

        fn format_name(&self) -> &str {
            "test"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }
    }

    #[test]
    fn test_export_manager_creation() {
        let manager = ExportManager::new();
        assert!(manager.has_format("csv"));
        assert!(manager.has_format("json"));
        assert!(manager.has_format("json-compact"));
    }

    #[test]
    fn test_register_exporter() {
        let mut manager = ExportManager::new();
        manager.register(Box::new(TestExporter));
        assert!(manager.has_format("test"));
    }

    #[test]
    fn test_export_unknown_format() {
        let manager = ExportManager::new();
        let scrape = create_test_scrape();
        let result = manager.export(&scrape, "unknown");
        assert!(result.is_err());
    }

    #[test]
    fn test_available_formats() {
        let manager = ExportManager::new();
        let formats = manager.available_formats();
        assert!(formats.contains(&"csv".to_string()));
        assert!(formats.contains(&"json".to_string()));
    }

    #[test]
    fn test_export_to_file_adds_extension() {
        let manager = ExportManager::new();
        let scrape = create_test_scrape();
        let dir = tempfile::TempDir::new().unwrap();

        let target = dir.path().join("comments");
        manager.export_to_file(&scrape, "csv", &target).unwrap();
        assert!(dir.path().join("comments.csv").exists());
    }

    #[test]
    fn test_export_to_file_atomic() {
        let manager = ExportManager::new();
        let scrape = create_test_scrape();
        let dir = tempfile::TempDir::new().unwrap();

        let target = dir.path().join("comments.csv");
        manager.export_to_file(&scrape, "csv", &target).unwrap();
        assert!(target.exists());
        assert!(!dir.path().join("comments.tmp").exists());
    }
}
