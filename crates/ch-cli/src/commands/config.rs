//! Config command
//!
//! Manage comment-harvester configuration.

use anyhow::{Context, Result};
use ch_core::config::Config;
use clap::Subcommand;
use std::fs;
use std::path::PathBuf;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(json),
        ConfigCommand::Init { force } => init_config(force),
        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
    }
}

/// Default configuration file path
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "comment-harvester", "comment-harvester")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".comment-harvester")
                .join("config.toml")
        })
}

fn show_config(as_json: bool) -> Result<()> {
    use colored::Colorize;

    let path = config_path();

    if !path.exists() {
        eprintln!(
            "{} No configuration file. Run '{}' to create one; defaults apply until then.",
            "⚠".yellow(),
            "comment-harvester config init".cyan()
        );
        if as_json {
            println!("{}", serde_json::to_string_pretty(&Config::default())?);
        } else {
            println!("{}", toml::to_string_pretty(&Config::default())?);
        }
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;

    if as_json {
        let config: Config = toml::from_str(&content)
            .context(format!("Failed to parse config: {}", path.display()))?;
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", path.display().to_string().dimmed());
        println!();
        println!("{}", content);
    }

    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    use colored::Colorize;

    let path = config_path();

    if path.exists() && !force {
        eprintln!(
            "{} Configuration already exists at {}. Use --force to overwrite.",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;

    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}
