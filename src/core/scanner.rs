//! Recursive source tree scanning.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::core::log::LogSink;

pub const DEFAULT_SOURCE_EXTENSION: &str = "swift";

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extensions (without the dot) that count as source files.
    pub extensions: Vec<String>,
    /// Paths relative to the root to skip. Entries containing `*` or `?` are
    /// glob patterns, anything else is a literal path prefix.
    pub ignores: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
            ignores: Vec::new(),
        }
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

struct IgnoreMatcher {
    literal_paths: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreMatcher {
    fn new(ignores: &[String], sink: &LogSink) -> Self {
        let mut literal_paths = Vec::new();
        let mut globs = Vec::new();
        for p in ignores {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => globs.push(pattern),
                    Err(e) => sink.warn(format!("Invalid ignore pattern '{}': {}", p, e)),
                }
            } else {
                literal_paths.push(PathBuf::from(p.trim_start_matches("./")));
            }
        }
        Self {
            literal_paths,
            globs,
        }
    }

    fn is_ignored(&self, relative: &Path) -> bool {
        if self.literal_paths.iter().any(|p| relative.starts_with(p)) {
            return true;
        }
        let relative = relative.to_string_lossy();
        self.globs.iter().any(|p| p.matches(&relative))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Walk `root` depth-first and return every source file, in discovery order.
///
/// Hidden entries are skipped. Symlinked directories are followed, but a
/// link back into one of its own ancestors is reported and not descended.
/// Unreadable entries are reported and skipped; scanning continues.
pub fn scan_source_files(root: &Path, options: &ScanOptions, sink: &LogSink) -> Vec<PathBuf> {
    let ignores = IgnoreMatcher::new(&options.ignores, sink);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if is_hidden(entry) {
                return false;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            entry.depth() == 0 || !ignores.is_ignored(relative)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    sink.warn(format!(
                        "Skipping symlink cycle at {} (points back to {})",
                        e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        ancestor.display()
                    ));
                } else {
                    sink.warn(format!("Cannot access path: {}", e));
                }
                continue;
            }
        };

        if entry.file_type().is_file() && has_source_extension(entry.path(), &options.extensions) {
            files.push(entry.into_path());
        }
    }

    files
}

fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Display name of a scanned file relative to the scan root, `/`-separated.
pub fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}
