use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{load_project_config, path_override, with_log_printer};
use crate::cli::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{print_json, print_run_report},
};
use crate::config::Config;
use crate::core::{RunReport, RunStatus, run_extraction};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let (mut config, root_dir) = load_project_config(&cmd.common)?;
    apply_overrides(&mut config, &cmd, &root_dir);
    config.validate()?;

    let report = with_log_printer(cmd.common.verbose, |sink| {
        let request = config.extraction_request(&root_dir, cmd.dry_run, sink);
        run_extraction(&request, sink)
    });

    if cmd.json {
        print_json(&report)?;
    } else if report.status == RunStatus::Completed {
        print_run_report(&report, cmd.dry_run);
    }

    Ok(exit_status(&report, cmd.check))
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut Config, cmd: &ExtractCommand, root_dir: &Path) {
    let start_dir = cmd.common.root.clone().unwrap_or_else(|| PathBuf::from("."));

    if let Some(source_root) = &cmd.source_root {
        config.source_root = path_override(source_root, &start_dir, root_dir);
    }
    if !cmd.languages.is_empty() {
        config.languages = cmd.languages.clone();
    }
    if let Some(catalog_file) = &cmd.catalog_file {
        config.catalog_file_name = catalog_file.clone();
    }
    if !cmd.patterns.is_empty() {
        config.patterns = cmd.patterns.clone();
    }
    if let Some(example) = &cmd.example {
        // An example on the command line beats patterns from the config file.
        config.usage_example = Some(example.clone());
        if cmd.patterns.is_empty() {
            config.patterns.clear();
        }
    }
    if cmd.comments {
        config.include_comments = true;
    }
}

fn exit_status(report: &RunReport, check: bool) -> ExitStatus {
    if report.status == RunStatus::Aborted {
        ExitStatus::Error
    } else if report.failed_languages() > 0 || (check && report.has_changes()) {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
