//! Summary statistics over normalized comment batches

use super::model::UnifiedComment;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary statistics for a scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentStats {
    /// Total comment count
    pub total: usize,
    /// Distinct author count (authorless comments excluded)
    pub distinct_authors: usize,
    /// Most frequent author, ties broken by first occurrence
    pub most_active_author: Option<String>,
    /// Mean message length in characters
    pub avg_message_chars: f64,
    /// Number of comments that are replies
    pub reply_count: usize,
}

impl CommentStats {
    /// Compute statistics over an ordered comment batch
    pub fn compute(comments: &[UnifiedComment]) -> Self {
        let total = comments.len();
        let reply_count = comments.iter().filter(|c| c.is_reply).count();

        let avg_message_chars = if total == 0 {
            0.0
        } else {
            let chars: usize = comments.iter().map(|c| c.message_chars()).sum();
            chars as f64 / total as f64
        };

        // Order-preserving frequency count: first-seen order breaks ties
        let mut first_seen: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for author in comments.iter().filter_map(|c| c.author.as_deref()) {
            let count = counts.entry(author).or_insert(0);
            if *count == 0 {
                first_seen.push(author);
            }
            *count += 1;
        }

        // Strictly-greater comparison over first-seen order: the earliest
        // author wins a tie
        let mut most_active_author: Option<String> = None;
        let mut best = 0usize;
        for author in &first_seen {
            let count = counts[author];
            if count > best {
                best = count;
                most_active_author = Some(author.to_string());
            }
        }

        Self {
            total,
            distinct_authors: first_seen.len(),
            most_active_author,
            avg_message_chars,
            reply_count,
        }
    }
}

/// A single histogram bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Inclusive bin start
    pub start: DateTime<Utc>,
    /// Comments falling into this bin
    pub count: usize,
}

/// Comment activity over time, binned between the earliest and latest
/// timestamps in a batch
///
/// Only comments carrying a timestamp participate; a batch with none has no
/// histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeHistogram {
    /// Earliest timestamp in the batch
    pub start: DateTime<Utc>,
    /// Latest timestamp in the batch
    pub end: DateTime<Utc>,
    /// Equal-width bins in chronological order
    pub buckets: Vec<HistogramBucket>,
}

impl TimeHistogram {
    /// Build a histogram with the requested bin count
    ///
    /// Returns `None` when no comment carries a timestamp. A batch whose
    /// timestamps all coincide collapses to a single bin.
    pub fn build(comments: &[UnifiedComment], bins: usize) -> Option<Self> {
        let timestamps: Vec<DateTime<Utc>> =
            comments.iter().filter_map(|c| c.timestamp).collect();
        if timestamps.is_empty() {
            return None;
        }

        let start = *timestamps.iter().min().expect("non-empty timestamps");
        let end = *timestamps.iter().max().expect("non-empty timestamps");
        let bins = bins.max(1);

        let span_ms = (end - start).num_milliseconds();
        if span_ms == 0 {
            return Some(Self {
                start,
                end,
                buckets: vec![HistogramBucket {
                    start,
                    count: timestamps.len(),
                }],
            });
        }

        let mut counts = vec![0usize; bins];
        for ts in &timestamps {
            let offset_ms = (*ts - start).num_milliseconds();
            let index = ((offset_ms as f64 / span_ms as f64) * bins as f64) as usize;
            counts[index.min(bins - 1)] += 1;
        }

        let buckets = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBucket {
                start: start + Duration::milliseconds(span_ms * i as i64 / bins as i64),
                count,
            })
            .collect();

        Some(Self {
            start,
            end,
            buckets,
        })
    }

    /// Largest bin count (for bar scaling)
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn comment(author: Option<&str>, message: &str) -> UnifiedComment {
        UnifiedComment {
            author: author.map(str::to_string),
            message: message.to_string(),
            timestamp: None,
            is_reply: false,
            parent_author: None,
            like_count: None,
        }
    }

    fn at(epoch: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(epoch, 0).unwrap()
    }

    #[test]
    fn test_stats_empty_batch() {
        let stats = CommentStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.distinct_authors, 0);
        assert_eq!(stats.most_active_author, None);
        assert_eq!(stats.avg_message_chars, 0.0);
    }

    #[test]
    fn test_stats_counts() {
        let comments = vec![
            comment(Some("amy"), "one"),
            comment(Some("bob"), "three"),
            comment(Some("amy"), "12345"),
            comment(None, "anon"),
        ];

        let stats = CommentStats::compute(&comments);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distinct_authors, 2);
        assert_eq!(stats.most_active_author.as_deref(), Some("amy"));
        assert_eq!(stats.avg_message_chars, (3 + 5 + 5 + 4) as f64 / 4.0);
    }

    #[test]
    fn test_most_active_tie_breaks_on_first_occurrence() {
        let comments = vec![
            comment(Some("bob"), "a"),
            comment(Some("amy"), "b"),
            comment(Some("amy"), "c"),
            comment(Some("bob"), "d"),
        ];

        // Both have two comments; bob appeared first
        let stats = CommentStats::compute(&comments);
        assert_eq!(stats.most_active_author.as_deref(), Some("bob"));
    }

    #[test]
    fn test_histogram_none_without_timestamps() {
        let comments = vec![comment(Some("amy"), "a"), comment(Some("bob"), "b")];
        assert!(TimeHistogram::build(&comments, 20).is_none());
    }

    #[test]
    fn test_histogram_bins_cover_all_timestamps() {
        let mut comments: Vec<UnifiedComment> = (0..10)
            .map(|i| {
                let mut c = comment(Some("amy"), "msg");
                c.timestamp = Some(at(1_700_000_000 + i * 60));
                c
            })
            .collect();
        // One timestampless comment is excluded from the histogram only
        comments.push(comment(Some("bob"), "late"));

        let hist = TimeHistogram::build(&comments, 5).unwrap();
        assert_eq!(hist.buckets.len(), 5);
        let binned: usize = hist.buckets.iter().map(|b| b.count).sum();
        assert_eq!(binned, 10);
        assert_eq!(hist.start, at(1_700_000_000));
        assert_eq!(hist.end, at(1_700_000_000 + 9 * 60));
    }

    #[test]
    fn test_histogram_single_instant() {
        let mut a = comment(Some("amy"), "a");
        a.timestamp = Some(at(1_700_000_000));
        let mut b = comment(Some("bob"), "b");
        b.timestamp = Some(at(1_700_000_000));

        let hist = TimeHistogram::build(&[a, b], 20).unwrap();
        assert_eq!(hist.buckets.len(), 1);
        assert_eq!(hist.buckets[0].count, 2);
    }

    #[test]
    fn test_histogram_max_count() {
        let mut comments = Vec::new();
        for i in 0..4 {
            let mut c = comment(Some("amy"), "m");
            c.timestamp = Some(at(1_700_000_000 + (i / 3) * 3600));
            comments.push(c);
        }

        let hist = TimeHistogram::build(&comments, 2).unwrap();
        assert_eq!(hist.max_count(), 3);
    }
}
