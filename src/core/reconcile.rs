//! Classification of extracted keys against an existing catalog.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Outcome of reconciling one language's catalog. All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    /// Extracted but absent from the catalog.
    pub new: Vec<String>,
    /// In the catalog but no longer extracted.
    pub missing: Vec<String>,
    /// Extracted and present, with a translated value or a different comment.
    pub changed: Vec<String>,
    /// Defined in a format-variant catalog, so kept out of the flat catalog.
    pub duplicate_format_excluded: Vec<String>,
}

/// Comment maps used when comment tracking is enabled.
#[derive(Debug, Clone, Copy)]
pub struct CommentMaps<'a> {
    pub extracted: &'a BTreeMap<String, String>,
    pub existing: &'a BTreeMap<String, String>,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.missing.is_empty() && self.changed.is_empty()
    }

    /// Record format-variant keys and drop them from the other lists so the
    /// four lists stay disjoint.
    pub fn exclude_duplicate_format(mut self, keys: &BTreeSet<String>) -> Self {
        self.new.retain(|k| !keys.contains(k));
        self.missing.retain(|k| !keys.contains(k));
        self.changed.retain(|k| !keys.contains(k));
        self.duplicate_format_excluded = keys.iter().cloned().collect();
        self
    }
}

/// Compare extracted keys with an existing catalog.
///
/// A present key counts as changed when its stored value (trimmed) is no
/// longer the key itself (trimmed), i.e. it has been translated away from
/// the placeholder, or, with comment tracking, when the stored comment
/// differs from the extracted one.
pub fn analyze(
    extracted: &BTreeSet<String>,
    existing_values: &BTreeMap<String, String>,
    comments: Option<CommentMaps<'_>>,
) -> ChangeSummary {
    let new = extracted
        .iter()
        .filter(|key| !existing_values.contains_key(*key))
        .cloned()
        .collect();

    let missing = existing_values
        .keys()
        .filter(|key| !extracted.contains(*key))
        .cloned()
        .collect();

    let changed = extracted
        .iter()
        .filter_map(|key| existing_values.get(key).map(|value| (key, value)))
        .filter(|(key, value)| {
            value.trim() != key.trim()
                || comments.is_some_and(|maps| comment_differs(key, maps))
        })
        .map(|(key, _)| key.clone())
        .collect();

    ChangeSummary {
        new,
        missing,
        changed,
        duplicate_format_excluded: Vec::new(),
    }
}

fn comment_differs(key: &str, maps: CommentMaps<'_>) -> bool {
    let extracted = maps.extracted.get(key).map(|c| c.trim());
    let existing = maps.existing.get(key).map(|c| c.trim());
    extracted != existing
}
