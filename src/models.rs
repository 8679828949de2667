//! Data models for the follower analysis.
//!
//! This module contains the core data structures shared between the
//! extractor, the analyzer and the report generator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A set of usernames. Ordered so that display and CSV output are sorted.
pub type UsernameSet = BTreeSet<String>;

/// A single account entry read from an export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Account username, case-sensitive and otherwise opaque.
    pub username: String,
    /// Unix timestamp of when the follow relationship started, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_at: Option<i64>,
}

impl ExportEntry {
    /// Creates an entry with no timestamp.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            followed_at: None,
        }
    }
}

/// Output format for the not-following-back report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `username` column (default)
    #[default]
    Csv,
    /// Full analysis as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Result of comparing the following and followers sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowAnalysis {
    /// Number of accounts the user follows.
    pub following_count: usize,
    /// Number of accounts following the user.
    pub followers_count: usize,
    /// Accounts that follow each other.
    pub mutual: UsernameSet,
    /// Followed accounts that do not follow back.
    pub not_following_back: UsernameSet,
    /// `not_following_back` minus the ignore list.
    pub filtered: UsernameSet,
    /// How many of `not_following_back` are on the ignore list.
    pub ignored_count: usize,
}

/// Per-follower engagement aggregate built from likes history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub username: String,
    pub post_likes: usize,
    pub story_likes: usize,
    pub total_likes: usize,
    /// Unix timestamp from the followers export, when known.
    pub followed_since: Option<i64>,
    pub likes_per_content: f64,
    pub days_since_followed: f64,
    pub likes_per_day: f64,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_set_is_sorted() {
        let set: UsernameSet = ["zoe", "alice", "Bob"].iter().map(|s| s.to_string()).collect();
        let ordered: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(ordered, vec!["Bob", "alice", "zoe"]);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_export_entry_new() {
        let entry = ExportEntry::new("bob");
        assert_eq!(entry.username, "bob");
        assert!(entry.followed_at.is_none());
    }
}
