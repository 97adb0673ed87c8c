//! Regex-driven key and comment extraction.

use std::collections::{BTreeMap, BTreeSet};

use regex::{Captures, Regex};

use crate::core::log::LogSink;

/// Compiled extraction patterns.
///
/// Capture group 1 is the key, optional capture group 2 the comment.
/// Anything a pattern matches after its last capture group is context: the
/// next match may start inside it, so `"a".localized"b".localized` yields
/// both keys. Patterns that fail to compile, or that have no capture group,
/// are logged and left out; they never abort a run.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn compile(sources: &[String], sink: &LogSink) -> Self {
        let mut patterns = Vec::with_capacity(sources.len());
        for source in sources {
            match Regex::new(source) {
                // captures_len() counts the implicit whole-match group.
                Ok(re) if re.captures_len() < 2 => {
                    sink.warn(format!(
                        "Skipping pattern without a key capture group: {}",
                        source
                    ));
                }
                Ok(re) => patterns.push(re),
                Err(e) => {
                    sink.warn(format!("Skipping invalid pattern '{}': {}", source, e));
                }
            }
        }
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Collect every distinct key matched by any pattern.
    pub fn extract_keys(&self, text: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for re in &self.patterns {
            for caps in captures(re, text) {
                if let Some(key) = caps.get(1) {
                    keys.insert(key.as_str().to_string());
                }
            }
        }
        keys
    }

    /// Collect keys together with their developer comment.
    ///
    /// A missing or empty comment group falls back to the key itself. When a
    /// key is matched more than once, the last match wins.
    pub fn extract_keys_with_comments(&self, text: &str) -> BTreeMap<String, String> {
        let mut comments = BTreeMap::new();
        for re in &self.patterns {
            for caps in captures(re, text) {
                let Some(key) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                let comment = caps
                    .get(2)
                    .map(|m| m.as_str())
                    .filter(|c| !c.is_empty())
                    .unwrap_or(key);
                comments.insert(key.to_string(), comment.to_string());
            }
        }
        comments
    }
}

/// Successive matches of `re`, each search resuming at the end of the
/// previous match's last participating capture group.
fn captures<'t>(re: &Regex, text: &'t str) -> Vec<Captures<'t>> {
    let mut found = Vec::new();
    let mut start = 0;
    while start <= text.len() {
        let Some(caps) = re.captures_at(text, start) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let context_start = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.end())
            .max()
            .unwrap_or(whole.end());
        start = if context_start > whole.start() {
            context_start
        } else {
            // Empty groups at the match start: step past the match instead.
            let step = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
            whole.end().max(whole.start() + step)
        };
        found.push(caps);
    }
    found
}
