//! JSON export parsing.
//!
//! Instagram has shipped several JSON layouts over time. Each document is
//! classified into exactly one [`ExportShape`] before any entry is read.

use super::ExtractError;
use crate::models::ExportEntry;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

const WRAPPER_KEYS: [&str; 2] = ["relationships_following", "relationships_followers"];
const FLAT_KEYS: [&str; 2] = ["usernames", "data"];

/// Known layouts of a JSON export document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportShape<'a> {
    /// `{"relationships_following": [...]}` and/or `{"relationships_followers": [...]}`
    RelationshipWrapper(&'a Map<String, Value>),
    /// `{"usernames": [...]}` or `{"data": [...]}`
    FlatMapping(&'a [Value]),
    /// Top-level list of strings or entry objects.
    LegacyList(&'a [Value]),
    Unrecognized,
}

impl<'a> ExportShape<'a> {
    /// Resolve a document to a single shape.
    pub fn classify(doc: &'a Value) -> Self {
        match doc {
            Value::Array(items) => ExportShape::LegacyList(items),
            Value::Object(map) => {
                if WRAPPER_KEYS
                    .iter()
                    .any(|k| map.get(*k).is_some_and(Value::is_array))
                {
                    return ExportShape::RelationshipWrapper(map);
                }
                FLAT_KEYS
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_array))
                    .map(|items| ExportShape::FlatMapping(items))
                    .unwrap_or(ExportShape::Unrecognized)
            }
            _ => ExportShape::Unrecognized,
        }
    }

    /// Read every entry the shape contains.
    pub fn entries(&self) -> Vec<ExportEntry> {
        match self {
            ExportShape::RelationshipWrapper(map) => WRAPPER_KEYS
                .iter()
                .filter_map(|k| map.get(*k).and_then(Value::as_array))
                .flatten()
                .flat_map(entries_from_item)
                .collect(),
            ExportShape::FlatMapping(items) | ExportShape::LegacyList(items) => {
                items.iter().flat_map(entries_from_item).collect()
            }
            ExportShape::Unrecognized => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExportShape::RelationshipWrapper(_) => "relationship wrapper",
            ExportShape::FlatMapping(_) => "flat mapping",
            ExportShape::LegacyList(_) => "legacy list",
            ExportShape::Unrecognized => "unrecognized",
        }
    }
}

/// Entries for one list item: a bare username string or an entry object.
fn entries_from_item(item: &Value) -> Vec<ExportEntry> {
    match item {
        Value::String(s) => non_empty(s).map(ExportEntry::new).into_iter().collect(),
        Value::Object(obj) => entries_from_object(obj),
        other => {
            debug!("Skipping non-entry item: {}", other);
            Vec::new()
        }
    }
}

/// A non-empty `title` names the account; otherwise each
/// `string_list_data[].value` does.
fn entries_from_object(obj: &Map<String, Value>) -> Vec<ExportEntry> {
    let string_list: &[Value] = obj
        .get("string_list_data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if let Some(title) = obj.get("title").and_then(Value::as_str).and_then(non_empty) {
        let followed_at = string_list.iter().find_map(|d| d.get("timestamp").and_then(Value::as_i64));
        return vec![ExportEntry {
            username: title,
            followed_at,
        }];
    }

    string_list
        .iter()
        .filter_map(|data| {
            let username = data.get("value").and_then(Value::as_str).and_then(non_empty)?;
            Some(ExportEntry {
                username,
                followed_at: data.get("timestamp").and_then(Value::as_i64),
            })
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Parse a JSON export and return all entries.
///
/// An unrecognized document yields no entries and a warning.
pub fn parse_entries(content: &str, path: &Path) -> Result<Vec<ExportEntry>, ExtractError> {
    let doc: Value = serde_json::from_str(content).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let shape = ExportShape::classify(&doc);
    if shape == ExportShape::Unrecognized {
        warn!(
            "Unrecognized export layout in {}; no usernames extracted",
            path.display()
        );
        return Ok(Vec::new());
    }

    let entries = shape.entries();
    debug!(
        "{}: {} layout, {} entries",
        path.display(),
        shape.name(),
        entries.len()
    );

    Ok(entries)
}
