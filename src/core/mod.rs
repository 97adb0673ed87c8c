//! Extraction and reconciliation engine.
//!
//! ## Module Structure
//!
//! - `log`: Channel-backed side channel for progress and diagnostics
//! - `patterns`: Pattern templates and generation from a usage example
//! - `scanner`: Recursive source file discovery
//! - `extract`: Key and comment extraction with compiled patterns
//! - `catalog`: `.strings` / `.stringsdict` reading and `.strings` writing
//! - `reconcile`: Classification of keys against an existing catalog
//! - `orchestrator`: Full runs, language detection and the async service

pub mod catalog;
pub mod extract;
pub mod log;
pub mod orchestrator;
pub mod patterns;
pub mod reconcile;
pub mod scanner;

pub use log::{LogEvent, LogLevel, LogSink};
pub use orchestrator::{
    ExtractionRequest, ExtractionService, LanguageReport, RunReport, RunStatus, detect_languages,
    run_extraction,
};
pub use reconcile::ChangeSummary;
