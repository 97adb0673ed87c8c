//! strsync - keep Apple `.strings` catalogs in sync with source code
//!
//! strsync scans a source tree for localization keys using configurable regex
//! patterns, reconciles them against every language's `Localizable.strings`,
//! and rewrites each catalog grouped by source file while preserving existing
//! translations. Keys defined in `.stringsdict` catalogs are left out.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and reconciliation engine
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
