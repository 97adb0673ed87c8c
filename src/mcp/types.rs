use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{LogEvent, RunReport};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (where .strsyncrc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectLanguagesParams {
    pub project_root_path: String,
    /// Catalog directory relative to the project root (default: from config)
    #[serde(default)]
    pub catalog_dir: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePatternsParams {
    /// One example usage, e.g. "\"hello\".localized(comment: \"Greeting\")"
    pub example: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunExtractionParams {
    pub project_root_path: String,
    /// Compute changes without writing catalogs (default: false)
    #[serde(default)]
    pub dry_run: Option<bool>,
    /// Override the config's includeComments setting
    #[serde(default)]
    pub include_comments: Option<bool>,
}

// ============================================================
// Results
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    /// Directory relative paths in the config resolve against
    pub root_dir: String,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub source_root: String,
    pub catalog_dir: String,
    pub languages: Vec<String>,
    pub catalog_file_name: String,
    pub patterns: Vec<String>,
    pub usage_example: Option<String>,
    pub include_comments: bool,
    pub source_extensions: Vec<String>,
    pub ignores: Vec<String>,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            source_root: c.source_root,
            catalog_dir: c.catalog_dir,
            languages: c.languages,
            catalog_file_name: c.catalog_file_name,
            patterns: c.patterns,
            usage_example: c.usage_example,
            include_comments: c.include_comments,
            source_extensions: c.source_extensions,
            ignores: c.ignores,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResult {
    pub catalog_dir: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatternsResult {
    /// False when no template matched and the defaults are returned instead
    pub generated: bool,
    pub patterns: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunExtractionResult {
    pub report: RunReport,
    pub logs: Vec<LogEvent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRunResult {
    /// Null until a run has completed in this server session
    pub last_run: Option<RunReport>,
}
