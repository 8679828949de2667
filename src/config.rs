//! Configuration file handling.
//!
//! This module handles loading `.followback.toml` and merging it with
//! command-line arguments. Every setting defaults to the standard export
//! layout, so no config file is needed for a plain run.

use crate::models::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".followback.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Export and ignore list locations.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Engagement scoring settings.
    #[serde(default)]
    pub engagement: EngagementConfig,
}

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Accounts the user follows.
    #[serde(default = "default_following")]
    pub following: PathBuf,

    /// Accounts following the user.
    #[serde(default = "default_followers")]
    pub followers: PathBuf,

    /// Persistent ignore list.
    #[serde(default = "default_ignore_list")]
    pub ignore_list: PathBuf,

    /// Drop ignore-list entries for accounts no longer followed.
    #[serde(default = "default_true")]
    pub cleanup_ignore_list: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            following: default_following(),
            followers: default_followers(),
            ignore_list: default_ignore_list(),
            cleanup_ignore_list: true,
        }
    }
}

fn default_following() -> PathBuf {
    PathBuf::from("data/following.json")
}

fn default_followers() -> PathBuf {
    PathBuf::from("data/followers_1.json")
}

fn default_ignore_list() -> PathBuf {
    PathBuf::from("ignore_list.txt")
}

fn default_true() -> bool {
    true
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report file path.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("not_following_back.csv")
}

/// Engagement scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Score followers by likes history.
    #[serde(default)]
    pub enabled: bool,

    /// Likes on the user's posts.
    #[serde(default = "default_post_likes")]
    pub post_likes: PathBuf,

    /// Likes on the user's stories.
    #[serde(default = "default_story_likes")]
    pub story_likes: PathBuf,

    /// Scores CSV path.
    #[serde(default = "default_engagement_output")]
    pub output: PathBuf,

    /// How many top followers to print.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            post_likes: default_post_likes(),
            story_likes: default_story_likes(),
            output: default_engagement_output(),
            top: default_top(),
        }
    }
}

fn default_post_likes() -> PathBuf {
    PathBuf::from("data/post_likes.json")
}

fn default_story_likes() -> PathBuf {
    PathBuf::from("data/story_likes.json")
}

fn default_engagement_output() -> PathBuf {
    PathBuf::from("engagement_scores.csv")
}

fn default_top() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given on the command line override the config file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref path) = args.following {
            self.input.following = path.clone();
        }
        if let Some(ref path) = args.followers {
            self.input.followers = path.clone();
        }
        if let Some(ref path) = args.ignore_list {
            self.input.ignore_list = path.clone();
        }
        if args.no_cleanup {
            self.input.cleanup_ignore_list = false;
        }

        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }

        if args.engagement {
            self.engagement.enabled = true;
        }
        if let Some(ref path) = args.post_likes {
            self.engagement.post_likes = path.clone();
        }
        if let Some(ref path) = args.story_likes {
            self.engagement.story_likes = path.clone();
        }
        if let Some(ref path) = args.engagement_output {
            self.engagement.output = path.clone();
        }
        if let Some(top) = args.top {
            self.engagement.top = top;
        }
    }

    /// Check values that the TOML types alone do not constrain.
    pub fn validate(&self) -> Result<()> {
        if self.engagement.top == 0 {
            anyhow::bail!("engagement.top must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
