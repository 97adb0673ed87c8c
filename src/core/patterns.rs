//! Pattern generation from a usage example.
//!
//! A pattern is a regex string whose first capture group is the key and whose
//! optional second capture group is the developer comment. Keys and comments
//! are matched as quoted string bodies that may contain backslash escapes, so
//! `"say \"hi\""` captures `say \"hi\"`.

use crate::core::log::LogSink;

/// `"<key>".localized(comment: "<comment>")`
pub const LOCALIZED_LABELED_COMMENT: &str =
    r#""((?:[^"\\]|\\.)+)"\.localized\(\s*comment:\s*"((?:[^"\\]|\\.)*)"\s*\)"#;

/// `"<key>".localized("<comment>")`
pub const LOCALIZED_COMMENT: &str =
    r#""((?:[^"\\]|\\.)+)"\.localized\(\s*"((?:[^"\\]|\\.)*)"\s*\)"#;

/// `"<key>".localized` not followed by an argument list.
pub const LOCALIZED: &str = r#""((?:[^"\\]|\\.)+)"\.localized(?:[^\w(]|$)"#;

/// `<AnyPrefix>LocalizedString("<key>", comment: "<comment>")`
pub const PREFIXED_LOCALIZED_STRING: &str =
    r#"\w*LocalizedString\(\s*"((?:[^"\\]|\\.)+)"\s*,\s*comment:\s*"((?:[^"\\]|\\.)*)"\s*\)"#;

/// `NSLocalizedString("<key>")`
pub const NS_LOCALIZED_STRING: &str = r#"NSLocalizedString\(\s*"((?:[^"\\]|\\.)+)"\s*\)"#;

/// `NSLocalizedString("<key>", comment: "<comment>")`
pub const NS_LOCALIZED_STRING_COMMENT: &str =
    r#"NSLocalizedString\(\s*"((?:[^"\\]|\\.)+)"\s*,\s*comment:\s*"((?:[^"\\]|\\.)*)"\s*\)"#;

/// `L10n.<dotted.path>`
pub const L10N_PATH: &str = r"\bL10n\.([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)";

/// Patterns used when neither explicit patterns nor a usable example exist.
pub const DEFAULT_PATTERNS: &[&str] = &[
    LOCALIZED_LABELED_COMMENT,
    LOCALIZED_COMMENT,
    LOCALIZED,
    NS_LOCALIZED_STRING_COMMENT,
    NS_LOCALIZED_STRING,
];

pub fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Derive extraction patterns from one example usage.
///
/// The example is inspected by substring, not parsed. When it fits several
/// call shapes every matching template is returned, in template order. An
/// empty result means no template applied.
pub fn generate_patterns(example: &str) -> Vec<String> {
    let compact: String = example.chars().filter(|c| !c.is_whitespace()).collect();
    let has_comment = compact.contains("comment:");
    let mut patterns: Vec<&str> = Vec::new();

    if compact.contains(".localized(comment:") {
        patterns.push(LOCALIZED_LABELED_COMMENT);
    } else if compact.contains(".localized(\"") {
        patterns.push(LOCALIZED_COMMENT);
    } else if compact.contains(".localized") {
        patterns.push(LOCALIZED);
    }

    if compact.contains("LocalizedString(") {
        let is_ns = compact.contains("NSLocalizedString(");
        if has_comment {
            patterns.push(PREFIXED_LOCALIZED_STRING);
            if is_ns {
                patterns.push(NS_LOCALIZED_STRING_COMMENT);
            }
        } else if is_ns {
            patterns.push(NS_LOCALIZED_STRING);
        }
    }

    if compact.contains("L10n.") {
        patterns.push(L10N_PATH);
    }

    patterns.into_iter().map(String::from).collect()
}

/// Pick the pattern list for a run.
///
/// Explicit patterns win. Otherwise patterns are generated from `example`;
/// when that yields nothing (or there is no example) the defaults are used.
pub fn resolve_patterns(explicit: &[String], example: Option<&str>, sink: &LogSink) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let Some(example) = example.filter(|e| !e.trim().is_empty()) else {
        return default_patterns();
    };

    let generated = generate_patterns(example);
    if generated.is_empty() {
        sink.warn(format!(
            "No pattern template matches example '{}', falling back to default patterns",
            example
        ));
        return default_patterns();
    }

    sink.info(format!(
        "Generated {} pattern(s) from example '{}'",
        generated.len(),
        example
    ));
    generated
}
