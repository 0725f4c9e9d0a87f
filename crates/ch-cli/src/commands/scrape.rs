//! Scrape command
//!
//! Detect the platform of a link, run the matching transport adapter,
//! normalize the result, and show/save it.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use ch_adapters::adapter::instagram::InstagramSource;
use ch_adapters::adapter::{RedditSource, YoutubeApiSource, YoutubeWebSource};
use ch_adapters::{detect_link, CommentSource, DetectedLink, ScrapeTarget};
use ch_core::comment::Normalizer;
use ch_core::config::Config;
use ch_core::export::ExportManager;
use ch_core::scrape::ScrapeSource;
use ch_core::types::Platform;

use crate::render;

/// YouTube fetch method
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchMethod {
    /// YouTube Data API (requires an API key)
    Api,
    /// Watch-page scrape (no key required)
    Web,
}

/// Arguments for the scrape command
#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Post/video link (YouTube, Instagram, or Reddit)
    pub link: String,

    /// YouTube fetch method (overrides the configured default)
    #[arg(long, short, value_enum)]
    pub method: Option<FetchMethod>,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Instagram username
    #[arg(long, short)]
    pub username: Option<String>,

    /// Instagram password (prompted when omitted)
    #[arg(long, hide = true)]
    pub password: Option<String>,

    /// Write the result as CSV to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not persist the scrape
    #[arg(long)]
    pub no_save: bool,

    /// Maximum pages fetched (overrides the configured default)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Scrape storage directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Execute the scrape command
pub fn execute(args: ScrapeArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let detected = detect_link(&args.link)?;
    eprintln!(
        "{} Detected {} link",
        "→".cyan(),
        detected.platform.to_string().bold()
    );

    let (source, scrape_source) = build_source(&detected, &args, config)?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching comments via {}...", source.describe()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let raw = source.fetch(&detected.target);
    spinner.finish_and_clear();
    let raw = raw?;

    let normalizer = Normalizer::new().with_max_reply_depth(config.normalize.max_reply_depth);
    let comments = normalizer.normalize_all(&raw);

    if comments.is_empty() {
        eprintln!("{} No comments found.", "⚠".yellow());
        return Ok(());
    }

    println!("{} Scraped {} comments!", "✓".green(), comments.len().to_string().bold());
    println!();

    let stats = ch_core::comment::CommentStats::compute(&comments);
    render::print_summary(&stats);
    render::print_preview(&comments, config.export.preview_rows);
    if let Some(histogram) =
        ch_core::comment::TimeHistogram::build(&comments, config.export.histogram_bins)
    {
        render::print_histogram(&histogram);
    }

    if let Some(output) = &args.output {
        let scrape = ch_core::scrape::Scrape::new(scrape_source.clone(), comments.clone());
        ExportManager::new()
            .export_to_file(&scrape, "csv", output)
            .context(format!("Failed to write {}", output.display()))?;
        eprintln!("{} Wrote {}", "✓".green(), output.display());
        if !args.no_save {
            let manager = super::open_manager(args.data_dir.as_deref())?;
            let mut scrape = scrape;
            manager.save(&mut scrape)?;
            eprintln!("{} Saved scrape {}", "✓".green(), scrape.id.to_string().cyan());
        }
        return Ok(());
    }

    if !args.no_save {
        let manager = super::open_manager(args.data_dir.as_deref())?;
        let scrape = manager.create(scrape_source, comments)?;
        eprintln!("{} Saved scrape {}", "✓".green(), scrape.id.to_string().cyan());
    }

    Ok(())
}

/// Pick the adapter and scrape source for a detected link
fn build_source(
    detected: &DetectedLink,
    args: &ScrapeArgs,
    config: &Config,
) -> Result<(Box<dyn CommentSource>, ScrapeSource)> {
    match (&detected.platform, &detected.target) {
        (Platform::Youtube, ScrapeTarget::YoutubeVideo { video_id }) => {
            let method = args.method.unwrap_or_else(|| {
                if config.youtube.method == "web" {
                    FetchMethod::Web
                } else {
                    FetchMethod::Api
                }
            });
            let max_pages = args.max_pages.unwrap_or(config.youtube.max_pages);

            match method {
                FetchMethod::Api => {
                    let Some(api_key) = args
                        .api_key
                        .clone()
                        .or_else(|| config.youtube.api_key.clone())
                    else {
                        bail!(
                            "YouTube API key required. Pass --api-key, set YOUTUBE_API_KEY, \
                             or use --method web"
                        );
                    };
                    let source = YoutubeApiSource::new(api_key)?
                        .with_max_pages(max_pages)
                        .with_page_size(config.youtube.page_size);
                    Ok((
                        Box::new(source),
                        ScrapeSource::YoutubeApi {
                            video_id: video_id.clone(),
                            link: detected.link.clone(),
                        },
                    ))
                }
                FetchMethod::Web => {
                    let source = YoutubeWebSource::new()?.with_max_pages(max_pages);
                    Ok((
                        Box::new(source),
                        ScrapeSource::YoutubeWeb {
                            video_id: video_id.clone(),
                            link: detected.link.clone(),
                        },
                    ))
                }
            }
        }
        (Platform::Instagram, ScrapeTarget::InstagramPost { shortcode }) => {
            let username = match args.username.clone().or_else(|| config.instagram.username.clone())
            {
                Some(u) => u,
                None => dialoguer::Input::new()
                    .with_prompt("Instagram username")
                    .interact_text()
                    .context("Failed to read username")?,
            };
            let password = match args.password.clone() {
                Some(p) => p,
                None => dialoguer::Password::new()
                    .with_prompt("Instagram password")
                    .interact()
                    .context("Failed to read password")?,
            };

            let source = InstagramSource::new(username, password)?
                .with_max_pages(args.max_pages.unwrap_or(config.instagram.max_pages));
            Ok((
                Box::new(source),
                ScrapeSource::Instagram {
                    shortcode: shortcode.clone(),
                    link: detected.link.clone(),
                },
            ))
        }
        (Platform::Reddit, ScrapeTarget::RedditPost { url }) => {
            let source = RedditSource::new(&config.reddit.user_agent)?;
            Ok((
                Box::new(source),
                ScrapeSource::Reddit { link: url.clone() },
            ))
        }
        (platform, target) => bail!("Mismatched link detection: {} / {:?}", platform, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_method_values() {
        assert!(FetchMethod::from_str("api", true).is_ok());
        assert!(FetchMethod::from_str("web", true).is_ok());
        assert!(FetchMethod::from_str("carrier-pigeon", true).is_err());
    }

    #[test]
    fn test_youtube_api_requires_key() {
        let detected = detect_link("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let args = ScrapeArgs {
            link: detected.link.clone(),
            method: Some(FetchMethod::Api),
            api_key: None,
            username: None,
            password: None,
            output: None,
            no_save: true,
            max_pages: None,
            data_dir: None,
        };

        let result = build_source(&detected, &args, &Config::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_reddit_source_needs_no_credentials() {
        let detected =
            detect_link("https://www.reddit.com/r/rust/comments/abc123/title/").unwrap();
        let args = ScrapeArgs {
            link: detected.link.clone(),
            method: None,
            api_key: None,
            username: None,
            password: None,
            output: None,
            no_save: true,
            max_pages: None,
            data_dir: None,
        };

        let (source, scrape_source) =
            build_source(&detected, &args, &Config::default()).unwrap();
        assert_eq!(source.platform(), Platform::Reddit);
        assert!(matches!(scrape_source, ScrapeSource::Reddit { .. }));
    }
}
