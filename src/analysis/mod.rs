//! Follower set analysis.
//!
//! Pure set algebra over the following, followers and ignore sets, plus the
//! optional engagement scoring in [`engagement`].

pub mod engagement;

use crate::models::{FollowAnalysis, UsernameSet};

/// Compare the following and followers sets, then apply the ignore list.
pub fn analyze(following: &UsernameSet, followers: &UsernameSet, ignored: &UsernameSet) -> FollowAnalysis {
    let not_following_back: UsernameSet = following.difference(followers).cloned().collect();
    let mutual: UsernameSet = following.intersection(followers).cloned().collect();
    let filtered: UsernameSet = not_following_back.difference(ignored).cloned().collect();
    let ignored_count = not_following_back.intersection(ignored).count();

    FollowAnalysis {
        following_count: following.len(),
        followers_count: followers.len(),
        mutual,
        not_following_back,
        filtered,
        ignored_count,
    }
}
