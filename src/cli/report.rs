//! Report formatting and printing utilities.
//!
//! Kept apart from the engine so strsync can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use crate::core::{LanguageReport, LogEvent, LogLevel, RunReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print one engine log event to stderr. Info events need `verbose`.
pub fn print_log_event(event: &LogEvent, verbose: bool) {
    print_log_event_to(event, verbose, &mut io::stderr().lock());
}

pub fn print_log_event_to<W: Write>(event: &LogEvent, verbose: bool, writer: &mut W) {
    let label = match event.level {
        LogLevel::Info if !verbose => return,
        LogLevel::Info => "info:".bold().cyan(),
        LogLevel::Warning => "warning:".bold().yellow(),
        LogLevel::Error => "error:".bold().red(),
    };
    let _ = writeln!(writer, "{} {}", label, event.message);
}

/// Print per-language change lists followed by a totals line.
pub fn print_run_report(report: &RunReport, dry_run: bool) {
    print_run_report_to(report, dry_run, &mut io::stdout().lock());
}

pub fn print_run_report_to<W: Write>(report: &RunReport, dry_run: bool, writer: &mut W) {
    for language in &report.languages {
        print_language(language, writer);
    }
    print_totals(report, dry_run, writer);
}

fn print_language<W: Write>(language: &LanguageReport, writer: &mut W) {
    let s = &language.summary;
    let _ = writeln!(
        writer,
        "{} {}",
        format!("{}:", language.language).bold(),
        format!(
            "{} new, {} missing, {} changed, {} excluded",
            s.new.len(),
            s.missing.len(),
            s.changed.len(),
            s.duplicate_format_excluded.len()
        )
        .dimmed()
    );

    for line in language.change_log() {
        let colored_line = match line.chars().next() {
            Some('+') => line.green(),
            Some('-') => line.red(),
            Some('~') => line.yellow(),
            _ => line.dimmed(),
        };
        let _ = writeln!(writer, "  {}", colored_line);
    }

    if let Some(error) = &language.error {
        let _ = writeln!(
            writer,
            "  {} {}",
            FAILURE_MARK.red(),
            format!("Failed to write {}: {}", language.catalog_path.display(), error).red()
        );
    }
}

fn print_totals<W: Write>(report: &RunReport, dry_run: bool, writer: &mut W) {
    let files = report.source_files_scanned;
    let scanned = format!(
        "Scanned {} source {}, {} {}",
        files,
        if files == 1 { "file" } else { "files" },
        report.keys_extracted,
        if report.keys_extracted == 1 { "key" } else { "keys" }
    );

    let failed = report.failed_languages();
    if failed > 0 {
        let _ = writeln!(
            writer,
            "\n{} {}",
            FAILURE_MARK.red(),
            format!(
                "{}, {} of {} {} failed",
                scanned,
                failed,
                report.languages.len(),
                if report.languages.len() == 1 { "catalog" } else { "catalogs" }
            )
            .red()
        );
        return;
    }

    let outcome = if dry_run {
        "dry run, no catalogs written".to_string()
    } else {
        let written = report.languages.iter().filter(|l| l.written).count();
        format!(
            "updated {} {}",
            written,
            if written == 1 { "catalog" } else { "catalogs" }
        )
    };
    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!("{} ({})", scanned, outcome).green()
    );
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
