//! Full extraction runs across every configured language directory.
//!
//! A run scans the source tree once, extracts keys (and optionally comments)
//! from every file, then reconciles and rewrites each language's catalog
//! independently. Nothing escapes as an error: problems are reported through
//! the [`LogSink`] and recorded on the returned [`RunReport`].

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::core::{
    catalog::{
        KeysByFile, load_format_variant_keys, parse_comments, parse_values, read_catalog,
        render_catalog, sanitize_comment, write_catalog,
    },
    extract::PatternSet,
    log::LogSink,
    reconcile::{ChangeSummary, CommentMaps, analyze},
    scanner::{ScanOptions, relative_name, scan_source_files},
};

/// Suffix that marks a directory as a language directory.
pub const LANGUAGE_DIR_SUFFIX: &str = ".lproj";

pub const DEFAULT_CATALOG_FILE_NAME: &str = "Localizable.strings";

/// Everything a run needs. Paths are used as given.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub source_root: PathBuf,
    pub catalog_dir: PathBuf,
    /// Language directory names under `catalog_dir`, processed in this order.
    pub languages: Vec<String>,
    pub catalog_file_name: String,
    pub patterns: Vec<String>,
    pub include_comments: bool,
    pub scan: ScanOptions,
    /// Compute everything but leave catalogs on disk untouched.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Completed,
    /// A required path was missing; nothing was scanned or written.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageReport {
    pub language: String,
    pub catalog_path: PathBuf,
    pub summary: ChangeSummary,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LanguageReport {
    /// One line per classified key: `+` new, `-` missing, `~` changed,
    /// `=` excluded as a format-variant key.
    pub fn change_log(&self) -> Vec<String> {
        let s = &self.summary;
        let marked = |mark: char, keys: &[String]| {
            keys.iter()
                .map(move |k| format!("{} {}", mark, k))
                .collect::<Vec<_>>()
        };
        [
            marked('+', &s.new),
            marked('-', &s.missing),
            marked('~', &s.changed),
            marked('=', &s.duplicate_format_excluded),
        ]
        .concat()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub status: RunStatus,
    pub source_files_scanned: usize,
    pub keys_extracted: usize,
    pub languages: Vec<LanguageReport>,
}

impl RunReport {
    fn aborted() -> Self {
        Self {
            status: RunStatus::Aborted,
            source_files_scanned: 0,
            keys_extracted: 0,
            languages: Vec::new(),
        }
    }

    /// The first language's summary, or an empty one when no language ran.
    pub fn summary(&self) -> ChangeSummary {
        self.languages
            .first()
            .map(|l| l.summary.clone())
            .unwrap_or_default()
    }

    pub fn failed_languages(&self) -> usize {
        self.languages.iter().filter(|l| l.error.is_some()).count()
    }

    pub fn has_changes(&self) -> bool {
        self.languages.iter().any(|l| !l.summary.is_empty())
    }
}

/// Keys and comments found in one source file.
struct FileExtraction {
    name: String,
    keys: BTreeSet<String>,
    comments: BTreeMap<String, String>,
}

/// Merged extraction results for the whole source tree.
#[derive(Default)]
struct Extracted {
    keys: BTreeSet<String>,
    keys_by_file: KeysByFile,
    comments_by_file: BTreeMap<String, BTreeMap<String, String>>,
}

impl Extracted {
    fn merge(extractions: Vec<FileExtraction>) -> Self {
        let mut merged = Self::default();
        for file in extractions {
            if file.keys.is_empty() {
                continue;
            }
            merged.keys.extend(file.keys.iter().cloned());
            merged
                .keys_by_file
                .entry(file.name.clone())
                .or_default()
                .extend(file.keys);
            merged
                .comments_by_file
                .entry(file.name)
                .or_default()
                .extend(file.comments);
        }
        merged
    }

    /// Comment per key, taken from the first file (by name) that uses it.
    /// This matches the section the catalog writer renders the key in.
    fn owner_comments(&self) -> BTreeMap<String, String> {
        let mut comments = BTreeMap::new();
        for (file, keys) in &self.keys_by_file {
            let Some(file_comments) = self.comments_by_file.get(file) else {
                continue;
            };
            for key in keys {
                if comments.contains_key(key) {
                    continue;
                }
                if let Some(comment) = file_comments.get(key) {
                    comments.insert(key.clone(), comment.clone());
                }
            }
        }
        comments
    }
}

/// Run a complete extraction and return what happened per language.
pub fn run_extraction(request: &ExtractionRequest, sink: &LogSink) -> RunReport {
    if request.source_root.as_os_str().is_empty() {
        sink.error("Source root is not set");
        return RunReport::aborted();
    }
    if request.catalog_dir.as_os_str().is_empty() {
        sink.error("Catalog directory is not set");
        return RunReport::aborted();
    }

    sink.info(format!(
        "Scanning {} for source files",
        request.source_root.display()
    ));
    let files = scan_source_files(&request.source_root, &request.scan, sink);
    sink.info(format!("Found {} source file(s)", files.len()));

    let patterns = PatternSet::compile(&request.patterns, sink);
    if patterns.is_empty() {
        sink.warn("No usable extraction patterns, no keys will be extracted");
    }

    let extracted = Extracted::merge(extract_files(
        &request.source_root,
        &files,
        &patterns,
        request.include_comments,
        sink,
    ));
    sink.info(format!(
        "Extracted {} unique key(s) from {} file(s)",
        extracted.keys.len(),
        extracted.keys_by_file.len()
    ));

    let format_keys = load_format_variant_keys(&request.catalog_dir, sink);
    let keys: BTreeSet<String> = extracted.keys.difference(&format_keys).cloned().collect();
    let comments = request.include_comments.then(|| extracted.owner_comments());

    if request.languages.is_empty() {
        sink.warn("No language directories configured, nothing to update");
    }

    let languages = request
        .languages
        .iter()
        .map(|language| {
            process_language(
                request,
                language,
                &keys,
                &extracted.keys_by_file,
                comments.as_ref(),
                &format_keys,
                sink,
            )
        })
        .collect();

    RunReport {
        status: RunStatus::Completed,
        source_files_scanned: files.len(),
        keys_extracted: keys.len(),
        languages,
    }
}

fn extract_files(
    root: &Path,
    files: &[PathBuf],
    patterns: &PatternSet,
    include_comments: bool,
    sink: &LogSink,
) -> Vec<FileExtraction> {
    files
        .par_iter()
        .filter_map(|path| {
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    sink.warn(format!("Cannot read {}: {}", path.display(), e));
                    return None;
                }
            };

            let (keys, comments) = if include_comments {
                let comments: BTreeMap<String, String> = patterns
                    .extract_keys_with_comments(&text)
                    .into_iter()
                    .map(|(key, comment)| (key, sanitize_comment(&comment)))
                    .collect();
                (comments.keys().cloned().collect(), comments)
            } else {
                (patterns.extract_keys(&text), BTreeMap::new())
            };

            Some(FileExtraction {
                name: relative_name(root, path),
                keys,
                comments,
            })
        })
        .collect()
}

fn process_language(
    request: &ExtractionRequest,
    language: &str,
    keys: &BTreeSet<String>,
    keys_by_file: &KeysByFile,
    comments: Option<&BTreeMap<String, String>>,
    format_keys: &BTreeSet<String>,
    sink: &LogSink,
) -> LanguageReport {
    let catalog_path = request
        .catalog_dir
        .join(language)
        .join(&request.catalog_file_name);

    if !catalog_path.exists() {
        sink.info(format!(
            "{}: no catalog at {}, starting from scratch",
            language,
            catalog_path.display()
        ));
    }

    let existing = read_catalog(&catalog_path, sink);
    let existing_values = parse_values(&existing);
    let existing_comments = match comments {
        Some(_) => parse_comments(&existing),
        None => BTreeMap::new(),
    };

    let comment_maps = comments.map(|extracted| CommentMaps {
        extracted,
        existing: &existing_comments,
    });
    let summary = analyze(keys, &existing_values, comment_maps).exclude_duplicate_format(format_keys);

    let content = render_catalog(
        keys_by_file,
        &existing_values,
        comments,
        format_keys,
        request.include_comments,
    );

    let mut written = false;
    let mut error = None;
    if !request.dry_run {
        match write_catalog(&catalog_path, &content) {
            Ok(()) => written = true,
            Err(e) => {
                sink.error(format!("{}: {:#}", language, e));
                error = Some(format!("{:#}", e));
            }
        }
    }

    sink.info(format!(
        "{}: {} new, {} missing, {} changed, {} excluded",
        language,
        summary.new.len(),
        summary.missing.len(),
        summary.changed.len(),
        summary.duplicate_format_excluded.len()
    ));

    LanguageReport {
        language: language.to_string(),
        catalog_path,
        summary,
        written,
        error,
    }
}

/// Names of the immediate subdirectories of `base_dir` that are language
/// directories, sorted. An unreadable `base_dir` yields an empty list.
pub fn detect_languages(base_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(base_dir) else {
        return Vec::new();
    };

    let mut languages: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| name.ends_with(LANGUAGE_DIR_SUFFIX))
        .collect();
    languages.sort();
    languages
}

/// Background entry point for long-lived hosts.
///
/// Runs execute on tokio's blocking pool. The report of the most recent run
/// is cached and swapped in whole, so readers see either the previous or the
/// new result, never a mix.
#[derive(Debug, Clone, Default)]
pub struct ExtractionService {
    last_run: Arc<RwLock<Option<RunReport>>>,
}

impl ExtractionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run(&self, request: ExtractionRequest, sink: LogSink) -> RunReport {
        let task_sink = sink.clone();
        let report =
            match tokio::task::spawn_blocking(move || run_extraction(&request, &task_sink)).await {
                Ok(report) => report,
                Err(e) => {
                    sink.error(format!("Extraction task failed: {}", e));
                    RunReport::aborted()
                }
            };

        *self.last_run.write().await = Some(report.clone());
        report
    }

    pub async fn last_run(&self) -> Option<RunReport> {
        self.last_run.read().await.clone()
    }
}
