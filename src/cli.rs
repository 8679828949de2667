//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap. Every flag is
//! optional: with none, the fixed export paths from the config defaults apply.

use crate::models::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Followback - find Instagram accounts that don't follow you back
///
/// Reads the following/followers files from an Instagram data export
/// (HTML or JSON), applies your ignore list and writes the accounts
/// that don't follow you back to a CSV file.
///
/// Examples:
///   followback
///   followback --following data/following.html --followers data/followers_1.html
///   followback --format json --output report.json
///   followback --engagement --top 20
///   followback --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Export file listing the accounts you follow
    #[arg(long, value_name = "FILE")]
    pub following: Option<PathBuf>,

    /// Export file listing your followers
    #[arg(long, value_name = "FILE")]
    pub followers: Option<PathBuf>,

    /// Ignore list file (one username per line, `#` comments)
    #[arg(long, value_name = "FILE", env = "FOLLOWBACK_IGNORE_LIST")]
    pub ignore_list: Option<PathBuf>,

    /// Output file for accounts that don't follow back
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (csv, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Leave the ignore list untouched instead of dropping unfollowed accounts
    #[arg(long)]
    pub no_cleanup: bool,

    /// Score followers by likes on your posts and stories
    #[arg(long)]
    pub engagement: bool,

    /// Likes history for your posts (JSON: timestamp -> usernames)
    #[arg(long, value_name = "FILE")]
    pub post_likes: Option<PathBuf>,

    /// Likes history for your stories (JSON: timestamp -> usernames)
    #[arg(long, value_name = "FILE")]
    pub story_likes: Option<PathBuf>,

    /// Output file for engagement scores
    #[arg(long, value_name = "FILE")]
    pub engagement_output: Option<PathBuf>,

    /// Number of top engaged followers to print
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .followback.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .followback.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
