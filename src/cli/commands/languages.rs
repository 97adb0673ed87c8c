use anyhow::Result;

use crate::cli::{args::LanguagesCommand, exit_status::ExitStatus};
use crate::config::resolve_dir;
use crate::core::detect_languages;

use super::load_project_config;

pub fn languages(cmd: LanguagesCommand) -> Result<ExitStatus> {
    let (config, root_dir) = load_project_config(&cmd.common)?;
    let catalog_dir = resolve_dir(&root_dir, &config.catalog_dir);

    let languages = detect_languages(&catalog_dir);
    if languages.is_empty() {
        eprintln!(
            "No language directories found in {}",
            catalog_dir.display()
        );
        return Ok(ExitStatus::Failure);
    }

    for language in languages {
        println!("{}", language);
    }
    Ok(ExitStatus::Success)
}
