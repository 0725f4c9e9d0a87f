//! Stats command
//!
//! Show statistics and the activity histogram for a saved scrape.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use ch_core::comment::TimeHistogram;
use ch_core::config::Config;

use crate::render;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Scrape ID (defaults to the latest scrape)
    #[arg(long, short)]
    pub scrape: Option<String>,

    /// Histogram bin count
    #[arg(long)]
    pub bins: Option<usize>,

    /// Scrape storage directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Execute the stats command
pub fn execute(args: StatsArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let manager = super::open_manager(args.data_dir.as_deref())?;

    let scrape = if let Some(scrape_id) = &args.scrape {
        manager
            .resolve(scrape_id)
            .context(format!("Scrape '{}' not found", scrape_id))?
    } else {
        manager
            .load_latest()?
            .context("No scrapes found. Run 'comment-harvester scrape <LINK>' first")?
    };

    println!("{}", scrape.source.description().bold());
    println!(
        "{}",
        format!(
            "{} · scraped {}",
            scrape.id,
            scrape.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
    );
    println!();

    render::print_summary(&scrape.stats());

    let bins = args.bins.unwrap_or(config.export.histogram_bins);
    match TimeHistogram::build(&scrape.comments, bins) {
        Some(histogram) => render::print_histogram(&histogram),
        None => println!("{}", "No timestamps available for a histogram.".dimmed()),
    }

    Ok(())
}
