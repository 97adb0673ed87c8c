//! `.strings` catalog parsing.
//!
//! Grammar (one entry):
//!
//! ```text
//! /* optional comment, may span lines */
//! "key" = "value";
//! ```
//!
//! Several entries may share a line. A missing file reads as empty; any other
//! read failure is logged and also reads as empty. Duplicate keys resolve to
//! the last occurrence.

use std::{collections::BTreeMap, fs, io, path::Path, sync::LazyLock};

use regex::Regex;

use crate::core::log::LogSink;

// Comments are matched as whole tokens so entries inside them are skipped.
static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)/\*.*?\*/|//[^\n]*|"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#,
    )
    .unwrap()
});

// The comment body may span lines but never contains `*/`.
static COMMENTED_ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"/\*((?:[^*]|\*+[^*/])*)\*+/\s*"((?:[^"\\]|\\.)*)"\s*=\s*"(?:[^"\\]|\\.)*"\s*;"#)
        .unwrap()
});

static SECTION_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=+ .* =+$").unwrap());

/// Read a catalog's text, or an empty string when it cannot be read.
pub fn read_catalog(path: &Path, sink: &LogSink) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            sink.warn(format!("Cannot read {}: {}", path.display(), e));
            String::new()
        }
    }
}

pub fn parse_values(content: &str) -> BTreeMap<String, String> {
    ENTRY_REGEX
        .captures_iter(content)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(key), Some(value)) => {
                Some((key.as_str().to_string(), value.as_str().to_string()))
            }
            _ => None,
        })
        .collect()
}

/// Map each key to the block comment directly above its entry.
///
/// Section headers written by the catalog writer are not comments of the
/// entry that follows them.
pub fn parse_comments(content: &str) -> BTreeMap<String, String> {
    let mut comments = BTreeMap::new();
    for caps in COMMENTED_ENTRY_REGEX.captures_iter(content) {
        let comment = caps[1].trim();
        if is_section_header(comment) {
            continue;
        }
        comments.insert(caps[2].to_string(), comment.to_string());
    }
    comments
}

pub(crate) fn is_section_header(comment: &str) -> bool {
    SECTION_HEADER_REGEX.is_match(comment)
}
