//! Engagement scoring from likes history.
//!
//! Each follower is scored by how often they like the user's posts and
//! stories, weighted by how long they have been following.

use crate::models::{EngagementRecord, UsernameSet};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

const SECONDS_PER_DAY: f64 = 86_400.0;

const TOTAL_LIKES_WEIGHT: f64 = 0.4;
const LIKES_PER_CONTENT_WEIGHT: f64 = 0.3;
const LIKES_PER_DAY_WEIGHT: f64 = 0.3;
const LIKES_PER_CONTENT_SCALE: f64 = 30.0;
const LIKES_PER_DAY_SCALE: f64 = 10.0;

/// Likes on a set of content items: content timestamp to liking usernames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikesHistory {
    by_content: BTreeMap<String, Vec<String>>,
}

impl LikesHistory {
    /// Load a likes history file. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No likes history at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read likes history: {}", path.display()))?;
        let doc: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse likes history: {}", path.display()))?;

        Ok(Self::from_value(&doc).unwrap_or_else(|| {
            warn!("Likes history {} is not a JSON object; ignoring it", path.display());
            Self::default()
        }))
    }

    /// Build from a `{timestamp: [username, ...]}` object. Non-string
    /// usernames and non-list values are skipped.
    pub fn from_value(doc: &Value) -> Option<Self> {
        let map = doc.as_object()?;

        let by_content: BTreeMap<String, Vec<String>> = map
            .iter()
            .map(|(timestamp, likers)| {
                let names: Vec<String> = likers
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                (timestamp.clone(), names)
            })
            .collect();

        Some(Self { by_content })
    }

    /// Number of content items in the history.
    pub fn content_count(&self) -> usize {
        self.by_content.len()
    }

    /// Likes per username across all content.
    pub fn like_counts(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in self.by_content.values().flatten() {
            *counts.entry(name.as_str()).or_default() += 1;
        }
        counts
    }
}

/// Inputs shared by every follower's score.
#[derive(Debug, Clone)]
pub struct EngagementInputs<'a> {
    pub posts: &'a LikesHistory,
    pub stories: &'a LikesHistory,
    /// Username to follow-start Unix timestamp.
    pub follow_times: &'a HashMap<String, i64>,
    /// Current Unix time in seconds.
    pub now: i64,
}

/// Score every follower, highest score first (ties by username).
pub fn score_followers(followers: &UsernameSet, inputs: &EngagementInputs<'_>) -> Vec<EngagementRecord> {
    let post_counts = inputs.posts.like_counts();
    let story_counts = inputs.stories.like_counts();
    let total_content = inputs.posts.content_count() + inputs.stories.content_count();

    let mut records: Vec<EngagementRecord> = followers
        .iter()
        .map(|username| {
            let post_likes = post_counts.get(username.as_str()).copied().unwrap_or(0);
            let story_likes = story_counts.get(username.as_str()).copied().unwrap_or(0);
            let followed_since = inputs.follow_times.get(username).copied();

            score_record(
                username,
                post_likes,
                story_likes,
                total_content,
                followed_since,
                inputs.now,
            )
        })
        .collect();

    records.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.username.cmp(&b.username))
    });

    records
}

fn score_record(
    username: &str,
    post_likes: usize,
    story_likes: usize,
    total_content: usize,
    followed_since: Option<i64>,
    now: i64,
) -> EngagementRecord {
    let total_likes = post_likes + story_likes;

    let likes_per_content = if total_content > 0 {
        total_likes as f64 / total_content as f64
    } else {
        0.0
    };

    let days_since_followed = followed_since
        .map(|since| (now.saturating_sub(since) as f64 / SECONDS_PER_DAY).max(1.0))
        .unwrap_or(1.0);

    let likes_per_day = total_likes as f64 / days_since_followed;

    let score = total_likes as f64 * TOTAL_LIKES_WEIGHT
        + likes_per_content * LIKES_PER_CONTENT_SCALE * LIKES_PER_CONTENT_WEIGHT
        + likes_per_day * LIKES_PER_DAY_SCALE * LIKES_PER_DAY_WEIGHT;

    EngagementRecord {
        username: username.to_string(),
        post_likes,
        story_likes,
        total_likes,
        followed_since,
        likes_per_content,
        days_since_followed,
        likes_per_day,
        score,
    }
}
