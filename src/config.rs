use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    ExtractionRequest, LogSink, detect_languages,
    orchestrator::DEFAULT_CATALOG_FILE_NAME,
    patterns::resolve_patterns,
    scanner::{DEFAULT_SOURCE_EXTENSION, ScanOptions},
};

pub const CONFIG_FILE_NAME: &str = ".strsyncrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
    /// Language directories to update, in order. Empty means every
    /// `*.lproj` directory found under `catalog_dir`.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default = "default_catalog_file_name")]
    pub catalog_file_name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub usage_example: Option<String>,
    #[serde(default)]
    pub include_comments: bool,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_catalog_dir() -> String {
    "./Resources".to_string()
}

fn default_catalog_file_name() -> String {
    DEFAULT_CATALOG_FILE_NAME.to_string()
}

fn default_source_extensions() -> Vec<String> {
    vec![DEFAULT_SOURCE_EXTENSION.to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            catalog_dir: default_catalog_dir(),
            languages: Vec::new(),
            catalog_file_name: default_catalog_file_name(),
            patterns: Vec::new(),
            usage_example: None,
            include_comments: false,
            source_extensions: default_source_extensions(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Regex patterns are not checked here; unusable ones are skipped (and
    /// reported) when a run compiles them.
    pub fn validate(&self) -> Result<()> {
        // Entries without wildcards are literal path prefixes.
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.catalog_file_name.is_empty()
            || self.catalog_file_name.contains(['/', '\\'])
        {
            bail!(
                "Invalid 'catalogFileName': \"{}\" (expected a plain file name)",
                self.catalog_file_name
            );
        }

        if self.source_extensions.is_empty() {
            bail!("'sourceExtensions' must not be empty");
        }

        Ok(())
    }

    /// Build a run request with paths resolved against `root_dir`.
    ///
    /// An empty `languages` list is filled from the language directories
    /// present under the catalog directory. Patterns come from `patterns`,
    /// else from `usageExample`, else the built-in defaults.
    pub fn extraction_request(
        &self,
        root_dir: &Path,
        dry_run: bool,
        sink: &LogSink,
    ) -> ExtractionRequest {
        let source_root = resolve_dir(root_dir, &self.source_root);
        let catalog_dir = resolve_dir(root_dir, &self.catalog_dir);

        let languages = if self.languages.is_empty() {
            let detected = detect_languages(&catalog_dir);
            sink.info(format!(
                "Detected {} language director{} in {}",
                detected.len(),
                if detected.len() == 1 { "y" } else { "ies" },
                catalog_dir.display()
            ));
            detected
        } else {
            self.languages.clone()
        };

        ExtractionRequest {
            source_root,
            catalog_dir,
            languages,
            catalog_file_name: self.catalog_file_name.clone(),
            patterns: resolve_patterns(&self.patterns, self.usage_example.as_deref(), sink),
            include_comments: self.include_comments,
            scan: ScanOptions {
                extensions: self.source_extensions.clone(),
                ignores: self.ignores.clone(),
            },
            dry_run,
        }
    }
}

/// Resolve a configured directory against the project root.
///
/// Empty values stay empty so the run can reject them.
pub fn resolve_dir(root_dir: &Path, value: &str) -> PathBuf {
    if value.is_empty() {
        return PathBuf::new();
    }

    let p = Path::new(value);
    if p.is_absolute() {
        return p.to_path_buf();
    }

    // Keep "./Resources" as-is when running from the current directory,
    // and avoid "<root>/./Resources" otherwise.
    let is_cur_dir = root_dir.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths resolve against: the config file's directory
    /// when one was found, the start directory otherwise.
    pub root_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root_dir: start_dir.to_path_buf(),
        }),
    }
}
