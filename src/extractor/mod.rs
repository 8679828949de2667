//! Username extraction from Instagram data exports.
//!
//! Exports come in two layouts: the legacy HTML pages and the newer JSON
//! files. Both are normalized into [`ExportEntry`] values here; callers only
//! ever see usernames and optional follow timestamps.

pub mod html;
pub mod json;

use crate::models::{ExportEntry, UsernameSet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use html::ProfileLinkRules;

/// Errors that abort extraction of a whole file.
///
/// Malformed entries inside a readable file are skipped, never reported here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Layout of an export file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    /// `.json` (any case) is JSON; everything else is treated as HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Html,
        }
    }
}

/// Read every account entry from an export file.
pub fn extract_entries(path: &Path) -> Result<Vec<ExportEntry>, ExtractError> {
    let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ExportFormat::from_path(path);
    debug!("Parsing {} as {:?}", path.display(), format);

    match format {
        ExportFormat::Json => json::parse_entries(&content, path),
        ExportFormat::Html => {
            let usernames = html::parse_usernames(&content, &ProfileLinkRules)?;
            Ok(usernames.into_iter().map(ExportEntry::new).collect())
        }
    }
}

/// Read the deduplicated set of usernames from an export file.
pub fn extract_usernames(path: &Path) -> Result<UsernameSet, ExtractError> {
    let entries = extract_entries(path)?;
    Ok(entries.into_iter().map(|e| e.username).collect())
}

/// Map each username to the earliest follow timestamp among `entries`.
///
/// Entries from HTML exports carry no timestamps and produce an empty map.
pub fn follow_times(entries: &[ExportEntry]) -> HashMap<String, i64> {
    let mut times: HashMap<String, i64> = HashMap::new();

    for entry in entries {
        if let Some(ts) = entry.followed_at {
            times
                .entry(entry.username.clone())
                .and_modify(|t| *t = (*t).min(ts))
                .or_insert(ts);
        }
    }

    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a/following.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("FOLLOWERS.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("following.html")), ExportFormat::Html);
        assert_eq!(ExportFormat::from_path(Path::new("following")), ExportFormat::Html);
    }

    #[test]
    fn test_extract_usernames_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "following.json",
            r#"{"relationships_following":[{"string_list_data":[{"value":"bob"}]}]}"#,
        );

        let usernames = extract_usernames(&path).unwrap();
        assert_eq!(usernames, UsernameSet::from(["bob".to_string()]));
    }

    #[test]
    fn test_extract_usernames_from_html_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "following.html", include_str!("../../fixtures/following.html"));

        let usernames = extract_usernames(&path).unwrap();
        assert!(usernames.contains("alice"));
        assert!(usernames.contains("bob"));
        assert!(usernames.contains("carol"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = extract_usernames(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.json", "{not json");
        let err = extract_usernames(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Json { .. }));
    }

    #[test]
    fn test_follow_times_keeps_earliest() {
        let entries = vec![
            ExportEntry { username: "a".to_string(), followed_at: Some(200) },
            ExportEntry { username: "a".to_string(), followed_at: Some(100) },
            ExportEntry { username: "b".to_string(), followed_at: None },
        ];

        let times = follow_times(&entries);
        assert_eq!(times.get("a"), Some(&100));
        assert!(!times.contains_key("b"));
    }

    #[test]
    fn test_follow_times_from_fixture() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "followers_1.json", include_str!("../../fixtures/followers_1.json"));

        let times = follow_times(&extract_entries(&path).unwrap());
        assert_eq!(times.get("bob"), Some(&1_690_000_000));
        assert_eq!(times.get("carol"), Some(&1_700_000_000));
        assert!(!times.contains_key("eve"));
    }
}
