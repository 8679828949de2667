//! Persistent ignore list.
//!
//! A flat UTF-8 text file with one username per line. Lines starting with
//! `#` are comments and blank lines are allowed; both survive every rewrite
//! untouched.

use crate::models::UsernameSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One line of the ignore list file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Comment or blank line, kept verbatim (including its line ending).
    Verbatim(String),
    /// Username line: the raw text and the trimmed username.
    Username { raw: String, name: String },
}

impl Line {
    fn parse(raw: &str) -> Self {
        let name = raw.trim();
        if name.is_empty() || name.starts_with('#') {
            Line::Verbatim(raw.to_string())
        } else {
            Line::Username {
                raw: raw.to_string(),
                name: name.to_string(),
            }
        }
    }

    fn raw(&self) -> &str {
        match self {
            Line::Verbatim(raw) | Line::Username { raw, .. } => raw,
        }
    }
}

/// Ignore list file contents, kept line for line.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    path: PathBuf,
    lines: Vec<Line>,
}

impl IgnoreList {
    /// Load the list from `path`. A missing file is an empty list.
    pub fn open(path: &Path) -> io::Result<Self> {
        let lines = match fs::read_to_string(path) {
            Ok(content) => content.split_inclusive('\n').map(Line::parse).collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No ignore list at {}", path.display());
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Usernames on the list.
    pub fn usernames(&self) -> UsernameSet {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Username { name, .. } => Some(name.clone()),
                Line::Verbatim(_) => None,
            })
            .collect()
    }

    /// Drop username lines absent from `following` and rewrite the file.
    ///
    /// Returns the removed usernames. The file is not written when nothing
    /// is removed, or when `following` is empty: an empty export would
    /// otherwise wipe every entry.
    pub fn cleanup(&mut self, following: &UsernameSet) -> io::Result<UsernameSet> {
        let mut removed = UsernameSet::new();

        if following.is_empty() {
            if !self.usernames().is_empty() {
                warn!(
                    "Following list is empty; leaving {} untouched",
                    self.path.display()
                );
            }
            return Ok(removed);
        }

        self.lines.retain(|line| match line {
            Line::Username { name, .. } if !following.contains(name) => {
                removed.insert(name.clone());
                false
            }
            _ => true,
        });

        if removed.is_empty() {
            return Ok(removed);
        }

        let content: String = self.lines.iter().map(Line::raw).collect();
        fs::write(&self.path, content)?;
        info!(
            "Removed {} stale entries from {}",
            removed.len(),
            self.path.display()
        );

        Ok(removed)
    }
}

/// Set of usernames on the ignore list at `path`; empty if the file is absent.
pub fn load(path: &Path) -> io::Result<UsernameSet> {
    Ok(IgnoreList::open(path)?.usernames())
}

/// Rewrite the ignore list at `path`, dropping usernames not in `following`.
pub fn cleanup(following: &UsernameSet, path: &Path) -> io::Result<UsernameSet> {
    IgnoreList::open(path)?.cleanup(following)
}
