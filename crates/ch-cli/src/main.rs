//! comment-harvester - Multi-Platform Comment Harvester CLI
//!
//! Scrape and analyze comments from YouTube, Instagram, and Reddit.
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape a YouTube video via the Data API
//! comment-harvester scrape "https://www.youtube.com/watch?v=dQw4w9WgXcQ" --api-key $YOUTUBE_API_KEY
//!
//! # Scrape a Reddit thread
//! comment-harvester scrape "https://www.reddit.com/r/rust/comments/abc123/title/"
//!
//! # Re-export the latest scrape as CSV
//! comment-harvester export --latest --output comments.csv
//! ```

mod commands;
mod render;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
