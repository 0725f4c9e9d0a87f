//! Scrapes command
//!
//! Manage saved scrapes.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use ch_core::scrape::ScrapeManager;

/// Scrapes subcommands
#[derive(Debug, Subcommand)]
pub enum ScrapesCommand {
    /// List saved scrapes
    List {
        /// Show detailed information
        #[arg(long)]
        detailed: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Limit number of scrapes
        #[arg(long, short, default_value = "10")]
        limit: usize,

        /// Scrape storage directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show scrape details
    Show {
        /// Scrape ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Scrape storage directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Delete a scrape
    Delete {
        /// Scrape ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Scrape storage directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Clean old scrapes
    Clean {
        /// Delete scrapes older than this many days
        #[arg(long, default_value = "30")]
        older_than: u64,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Scrape storage directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

/// Execute the scrapes command
pub fn execute(cmd: ScrapesCommand) -> Result<()> {
    match cmd {
        ScrapesCommand::List {
            detailed,
            json,
            limit,
            data_dir,
        } => {
            let manager = super::open_manager(data_dir.as_deref())?;
            list_scrapes(manager, detailed, json, limit)
        }
        ScrapesCommand::Show { id, json, data_dir } => {
            let manager = super::open_manager(data_dir.as_deref())?;
            show_scrape(manager, &id, json)
        }
        ScrapesCommand::Delete { id, yes, data_dir } => {
            let manager = super::open_manager(data_dir.as_deref())?;
            delete_scrape(manager, &id, yes)
        }
        ScrapesCommand::Clean {
            older_than,
            yes,
            data_dir,
        } => {
            let manager = super::open_manager(data_dir.as_deref())?;
            clean_scrapes(manager, older_than, yes)
        }
    }
}

fn list_scrapes(manager: ScrapeManager, detailed: bool, as_json: bool, limit: usize) -> Result<()> {
    use colored::Colorize;

    let scrapes = manager.list()?;

    if scrapes.is_empty() {
        println!("No scrapes found.");
        return Ok(());
    }

    let scrapes: Vec<_> = scrapes.into_iter().take(limit).collect();

    if as_json {
        let json = serde_json::to_string_pretty(&scrapes)?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", "Scrapes:".bold().underline());
    println!();

    for info in &scrapes {
        if detailed {
            println!("  {}", info.id.to_string().green());
            println!("    Source: {}", info.source_description);
            println!("    Comments: {}", info.comment_count);
            if let Some(name) = &info.metadata.name {
                println!("    Name: {}", name);
            }
            if !info.metadata.tags.is_empty() {
                println!("    Tags: {}", info.metadata.tags.join(", "));
            }
            println!(
                "    Created: {}",
                info.created_at.format("%Y-%m-%d %H:%M:%S")
            );
            println!();
        } else {
            let age = chrono::Utc::now()
                .signed_duration_since(info.updated_at)
                .num_hours();
            let age_str = if age < 1 {
                "just now".to_string()
            } else if age < 24 {
                format!("{}h ago", age)
            } else {
                format!("{}d ago", age / 24)
            };

            println!(
                "  {}  {}  {} comments  {}",
                info.id.to_string().green(),
                info.platform.to_string().cyan(),
                info.comment_count,
                age_str.dimmed()
            );
        }
    }

    Ok(())
}

fn show_scrape(manager: ScrapeManager, id: &str, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let scrape = manager
        .resolve(id)
        .context(format!("Scrape '{}' not found", id))?;

    if as_json {
        let json = serde_json::to_string_pretty(&scrape)?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", scrape.source.description().bold());
    println!("  ID: {}", scrape.id.to_string().green());
    println!("  Link: {}", scrape.source.link());
    println!("  Comments: {}", scrape.comment_count());
    println!(
        "  Scraped: {}",
        scrape.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(name) = &scrape.metadata.name {
        println!("  Name: {}", name);
    }

    Ok(())
}

fn delete_scrape(manager: ScrapeManager, id: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let scrape = manager
        .resolve(id)
        .context(format!("Scrape '{}' not found", id))?;

    if !yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete scrape {} ({} comments)?",
                scrape.id,
                scrape.comment_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    manager.delete(&scrape.id)?;
    println!("{} Deleted scrape {}", "✓".green(), scrape.id);

    Ok(())
}

fn clean_scrapes(manager: ScrapeManager, older_than_days: u64, yes: bool) -> Result<()> {
    use colored::Colorize;

    let cutoff = chrono::Utc::now() - chrono::Duration::days(older_than_days as i64);

    if !yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete all scrapes older than {} days?",
                older_than_days
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Clean cancelled.");
            return Ok(());
        }
    }

    let deleted = manager.clean(cutoff)?;
    println!("{} Deleted {} scrape(s)", "✓".green(), deleted);

    Ok(())
}
