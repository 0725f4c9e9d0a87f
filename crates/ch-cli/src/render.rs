//! Terminal rendering of scrape results
//!
//! Shared by the scrape and stats commands: summary metrics, the first-N
//! preview table, and the comment-activity histogram.

use ch_core::comment::{CommentStats, TimeHistogram, UnifiedComment};
use colored::Colorize;
use console::{pad_str, truncate_str, Alignment};

const AUTHOR_WIDTH: usize = 18;
const MESSAGE_WIDTH: usize = 48;
const TIME_WIDTH: usize = 20;
const BAR_WIDTH: usize = 40;

/// Print the summary metric block
pub fn print_summary(stats: &CommentStats) {
    println!("{}", "Comment Statistics".bold().underline());
    println!();
    print_metric("Total Comments", &stats.total.to_string());
    print_metric("Unique Users", &stats.distinct_authors.to_string());
    print_metric(
        "Most Active User",
        stats.most_active_author.as_deref().unwrap_or("—"),
    );
    print_metric(
        "Avg. Comment Length",
        &format!("{} chars", stats.avg_message_chars.round() as u64),
    );
    print_metric("Replies", &stats.reply_count.to_string());
    println!();
}

fn print_metric(label: &str, value: &str) {
    println!("  {} {}", format!("{:<22}", label).dimmed(), value.bold());
}

/// Print the preview table with the first `rows` comments
pub fn print_preview(comments: &[UnifiedComment], rows: usize) {
    if comments.is_empty() {
        return;
    }

    let shown = comments.len().min(rows);
    println!(
        "{}",
        format!("Preview (first {} of {})", shown, comments.len())
            .bold()
            .underline()
    );
    println!();
    println!(
        "  {} {} {} {}",
        pad_cell("AUTHOR", AUTHOR_WIDTH).dimmed(),
        pad_cell("MESSAGE", MESSAGE_WIDTH).dimmed(),
        pad_cell("TIME", TIME_WIDTH).dimmed(),
        "REPLY".dimmed(),
    );

    for comment in comments.iter().take(rows) {
        let author = comment.author.as_deref().unwrap_or("—");
        let time = comment.timestamp_string();
        let reply = if comment.is_reply {
            match &comment.parent_author {
                Some(parent) => format!("↳ {}", parent),
                None => "↳".to_string(),
            }
        } else {
            String::new()
        };

        println!(
            "  {} {} {} {}",
            pad_cell(author, AUTHOR_WIDTH).cyan(),
            pad_cell(&comment.message, MESSAGE_WIDTH),
            pad_cell(if time.is_empty() { "—" } else { &time }, TIME_WIDTH).dimmed(),
            reply.yellow(),
        );
    }
    println!();
}

/// Truncate (with ellipsis) and pad one table cell
fn pad_cell(value: &str, width: usize) -> String {
    let truncated = truncate_str(value, width, "…");
    pad_str(&truncated, width, Alignment::Left, None).to_string()
}

/// Print the comment-activity histogram
pub fn print_histogram(histogram: &TimeHistogram) {
    println!("{}", "Comment Activity Over Time".bold().underline());
    println!();

    let max = histogram.max_count().max(1);
    for bucket in &histogram.buckets {
        let bar_len = bucket.count * BAR_WIDTH / max;
        // Pad before coloring so ANSI codes don't skew the width
        let bar = format!("{:<width$}", "█".repeat(bar_len), width = BAR_WIDTH);
        println!(
            "  {} │{} {}",
            bucket.start.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            bar.green(),
            bucket.count,
        );
    }
    println!();
}
