//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod export;
pub mod scrape;
pub mod scrapes;
pub mod stats;

use anyhow::{Context, Result};
use ch_core::config::Config;
use ch_core::scrape::ScrapeManager;
use ch_storage::FileSystemStorage;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// comment-harvester - Multi-Platform Comment Harvester
#[derive(Debug, Parser)]
#[command(name = "comment-harvester")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scrape comments from a post/video link
    Scrape(scrape::ScrapeArgs),

    /// Export a saved scrape
    Export(export::ExportArgs),

    /// Show statistics for a saved scrape
    Stats(stats::StatsArgs),

    /// Manage saved scrapes
    #[command(subcommand)]
    Scrapes(scrapes::ScrapesCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(cli.config.as_deref())?;

    // Dispatch to command handler
    match cli.command {
        Commands::Scrape(args) => scrape::execute(args, &config),
        Commands::Export(args) => export::execute(args, &config),
        Commands::Stats(args) => stats::execute(args, &config),
        Commands::Scrapes(cmd) => scrapes::execute(cmd),
        Commands::Config(cmd) => config::execute(cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load configuration from an explicit path or the default location
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Configuration file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let default = config::config_path();
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .context(format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).context(format!("Failed to parse config: {}", path.display()))
}

/// Open the scrape store at an explicit directory or the default location
pub(crate) fn open_manager(data_dir: Option<&Path>) -> Result<ScrapeManager> {
    let storage = match data_dir {
        Some(dir) => FileSystemStorage::new(dir)?,
        None => FileSystemStorage::default_location()?,
    };
    Ok(ScrapeManager::new(storage))
}
