//! Catalog rendering and persistence.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result};

use super::KeysByFile;

/// Render the full text of a `.strings` catalog.
///
/// Files are emitted in ascending name order, keys in ascending order within
/// each file. A key referenced by several files is emitted once, in the first
/// file's section. Keys in `excluded` are never emitted. Existing values are
/// preserved; new keys get their own key as placeholder value.
pub fn render_catalog(
    keys_by_file: &KeysByFile,
    existing_values: &BTreeMap<String, String>,
    comments: Option<&BTreeMap<String, String>>,
    excluded: &BTreeSet<String>,
    include_comments: bool,
) -> String {
    let mut out = String::new();
    let mut emitted: HashSet<&str> = HashSet::new();

    for (file, keys) in keys_by_file {
        let section: Vec<&String> = keys
            .iter()
            .filter(|key| !excluded.contains(*key) && emitted.insert(key.as_str()))
            .collect();
        if section.is_empty() {
            continue;
        }

        out.push_str(&format!("\n/* ===== {} ===== */\n", file));
        for key in section {
            if include_comments {
                let comment = comments
                    .and_then(|c| c.get(key))
                    .map(String::as_str)
                    .unwrap_or(key);
                out.push_str(&format!("/* {} */\n", sanitize_comment(comment)));
            }
            let value = existing_values.get(key).unwrap_or(key);
            out.push_str(&format!("\"{}\" = \"{}\";\n", key, value));
        }
    }

    out
}

/// Make comment text safe to embed in a block comment.
pub fn sanitize_comment(comment: &str) -> String {
    comment.replace("*/", "* /")
}

/// Replace the catalog at `path` with `content`.
///
/// The content goes to a sibling temporary file first and is renamed into
/// place, so a failed write leaves the previous catalog untouched.
pub fn write_catalog(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("Invalid catalog path: {}", path.display()))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to replace file: {}", path.display()));
    }

    Ok(())
}
