use anyhow::Result;
use colored::Colorize;

use crate::cli::{args::PatternsCommand, exit_status::ExitStatus};
use crate::core::patterns::{default_patterns, generate_patterns};

pub fn patterns(cmd: PatternsCommand) -> Result<ExitStatus> {
    let generated = generate_patterns(&cmd.example);

    let patterns = if generated.is_empty() {
        eprintln!(
            "{} no pattern template matches the example, showing the default patterns",
            "warning:".bold().yellow()
        );
        default_patterns()
    } else {
        generated
    };

    for pattern in patterns {
        println!("{}", pattern);
    }
    Ok(ExitStatus::Success)
}
