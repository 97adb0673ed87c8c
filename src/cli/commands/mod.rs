pub mod extract;
pub mod init;
pub mod languages;
pub mod patterns;

use std::{
    path::{Path, PathBuf},
    thread,
};

use anyhow::Result;

use super::{args::CommonArgs, report::print_log_event};
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::LogSink;

/// Run `f` with a fresh log sink while a scoped thread prints its events.
///
/// Returns once `f` has finished and every event has been printed.
pub fn with_log_printer<T>(verbose: bool, f: impl FnOnce(&LogSink) -> T) -> T {
    let (sink, mut rx) = LogSink::channel();
    thread::scope(|s| {
        s.spawn(move || {
            while let Some(event) = rx.blocking_recv() {
                print_log_event(&event, verbose);
            }
        });
        let result = f(&sink);
        // Closing the channel lets the printer thread finish.
        drop(sink);
        result
    })
}

/// Load the config for `common.root` and apply the shared CLI overrides.
///
/// Returns the merged config and the directory relative paths resolve against.
pub fn load_project_config(common: &CommonArgs) -> Result<(Config, PathBuf)> {
    let start_dir = common.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let loaded = load_config(&start_dir)?;

    if common.verbose && !loaded.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    let mut config = loaded.config;
    if let Some(catalog_dir) = &common.catalog_dir {
        config.catalog_dir = path_override(catalog_dir, &start_dir, &loaded.root_dir);
    }

    Ok((config, loaded.root_dir))
}

/// Express a CLI path so that resolving it against `root_dir` points where
/// the user meant: relative to `--root` (or the current directory).
pub fn path_override(value: &Path, start_dir: &Path, root_dir: &Path) -> String {
    if value.is_absolute() || start_dir == root_dir {
        return value.to_string_lossy().to_string();
    }
    std::path::absolute(start_dir.join(value))
        .unwrap_or_else(|_| start_dir.join(value))
        .to_string_lossy()
        .to_string()
}
