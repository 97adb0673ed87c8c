//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract keys from sources and update every language catalog
//! - `languages`: List the language directories found in the catalog directory
//! - `patterns`: Show the extraction patterns generated from a usage example
//! - `init`: Initialize strsync configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by commands that work on a project.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; relative paths resolve against it (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory holding the *.lproj language directories (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source tree to scan (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Language directory to update; repeat for several (default: auto-detect)
    #[arg(long = "language", value_name = "NAME")]
    pub languages: Vec<String>,

    /// Catalog file name inside each language directory (overrides config file)
    #[arg(long, value_name = "NAME")]
    pub catalog_file: Option<String>,

    /// Extraction regex; group 1 is the key, group 2 the optional comment
    #[arg(long = "pattern", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Example usage to derive extraction patterns from
    #[arg(long, value_name = "TEXT")]
    pub example: Option<String>,

    /// Extract developer comments and write them above each entry
    #[arg(long)]
    pub comments: bool,

    /// Compute changes without writing catalogs
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when any catalog has new, missing or changed keys
    #[arg(long)]
    pub check: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LanguagesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct PatternsCommand {
    /// Example usage, e.g. '"hello".localized(comment: "Greeting")'
    pub example: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract localization keys and update .strings catalogs
    Extract(ExtractCommand),
    /// List language directories found in the catalog directory
    Languages(LanguagesCommand),
    /// Show extraction patterns generated from a usage example
    Patterns(PatternsCommand),
    /// Initialize a new .strsyncrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
