//! Export command
//!
//! Export a saved scrape to CSV or JSON.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use ch_core::config::Config;
use ch_core::export::ExportManager;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV with the fixed comment column header
    Csv,
    /// Pretty-printed JSON
    Json,
    /// Compact JSON
    JsonCompact,
}

impl ExportFormat {
    fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::JsonCompact => "json-compact",
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Scrape ID to export
    #[arg(long, short)]
    pub scrape: Option<String>,

    /// Export the latest scrape
    #[arg(long)]
    pub latest: bool,

    /// Export format
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scrape storage directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let manager = super::open_manager(args.data_dir.as_deref())?;

    // Load scrape
    let scrape = if let Some(scrape_id) = &args.scrape {
        manager
            .resolve(scrape_id)
            .context(format!("Scrape '{}' not found", scrape_id))?
    } else {
        manager
            .load_latest()?
            .context("No scrapes found. Run 'comment-harvester scrape <LINK>' first")?
    };

    eprintln!(
        "Exporting scrape {} ({} comments)...",
        scrape.id.to_string().cyan(),
        scrape.comment_count().to_string().yellow()
    );

    let export_manager = ExportManager::new();

    let format_name = match args.format {
        Some(format) => format.name().to_string(),
        None => config.export.default_format.clone(),
    };

    // Write output
    if let Some(output_path) = args.output {
        export_manager
            .export_to_file(&scrape, &format_name, &output_path)
            .context(format!("Failed to write to {}", output_path.display()))?;
        eprintln!("{} Exported to {}", "✓".green(), output_path.display());
    } else {
        let output = export_manager.export(&scrape, &format_name)?;
        std::io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_values() {
        assert!(ExportFormat::from_str("csv", true).is_ok());
        assert!(ExportFormat::from_str("json", true).is_ok());
        assert!(ExportFormat::from_str("json-compact", true).is_ok());
        assert!(ExportFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn test_format_names_are_registered() {
        let manager = ExportManager::new();
        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::JsonCompact] {
            assert!(manager.has_format(format.name()), "format: {:?}", format);
        }
    }
}
