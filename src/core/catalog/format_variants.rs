//! Keys defined in format-variant catalogs (`.stringsdict` property lists).
//!
//! Only the keys of the root dictionary matter: they name plural/format
//! entries that must not be duplicated into the flat `.strings` catalog.

use std::{collections::BTreeSet, fs, path::Path, sync::LazyLock};

use regex::Regex;
use walkdir::WalkDir;

use crate::core::log::LogSink;

pub const FORMAT_VARIANT_EXTENSION: &str = "stringsdict";

// Comments and CDATA sections are matched whole so markup inside them is inert.
static PLIST_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<dict\s*/>|<dict\b[^>]*>|</dict\s*>|<key>([^<]*)</key>",
    )
    .unwrap()
});

/// Collect the root-level keys of every `.stringsdict` under `base_dir`.
pub fn load_format_variant_keys(base_dir: &Path, sink: &LogSink) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    // A fresh project may not have a catalog directory yet.
    if !base_dir.is_dir() {
        return keys;
    }

    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                sink.warn(format!("Cannot access path: {}", e));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(FORMAT_VARIANT_EXTENSION)
        {
            continue;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let found = parse_format_variant_keys(&content);
                sink.info(format!(
                    "Found {} format-variant key(s) in {}",
                    found.len(),
                    path.display()
                ));
                keys.extend(found);
            }
            Err(e) => sink.warn(format!("Cannot read {}: {}", path.display(), e)),
        }
    }

    keys
}

/// Extract the keys of the root `<dict>` of a property list document.
pub fn parse_format_variant_keys(content: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut depth = 0usize;

    for caps in PLIST_TOKEN_REGEX.captures_iter(content) {
        if let Some(key) = caps.get(1) {
            if depth == 1 {
                keys.insert(decode_xml_entities(key.as_str().trim()));
            }
            continue;
        }

        let token = &caps[0];
        if token.starts_with("<!") {
            continue;
        } else if token.starts_with("</") {
            depth = depth.saturating_sub(1);
        } else if !token.ends_with("/>") {
            depth += 1;
        }
    }

    keys
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
