use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const APP_SWIFT: &str = r#"
import UIKit

final class HomeViewController: UIViewController {
    override func viewDidLoad() {
        title = "home_title".localized
        label.text = NSLocalizedString("welcome", comment: "Greeting on the home screen")
    }
}
"#;

const SETTINGS_SWIFT: &str = r#"
struct SettingsView {
    let header = "settings_title".localized
    let logout = "logout".localized
}
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("App/Home.swift", APP_SWIFT)?;
    test.write_file("App/Settings/SettingsView.swift", SETTINGS_SWIFT)?;
    test.create_dir("Resources/en.lproj")?;
    test.create_dir("Resources/fr.lproj")?;
    Ok(test)
}

#[test]
fn test_extract_writes_catalog_for_every_detected_language() -> Result<()> {
    let test = project()?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let expected = "\n/* ===== App/Home.swift ===== */\n\
                    \"home_title\" = \"home_title\";\n\
                    \"welcome\" = \"welcome\";\n\
                    \n/* ===== App/Settings/SettingsView.swift ===== */\n\
                    \"logout\" = \"logout\";\n\
                    \"settings_title\" = \"settings_title\";\n";
    assert_eq!(test.read_file("Resources/en.lproj/Localizable.strings")?, expected);
    assert_eq!(test.read_file("Resources/fr.lproj/Localizable.strings")?, expected);

    assert!(output.stdout.contains("en.lproj: 4 new, 0 missing, 0 changed, 0 excluded"));
    assert!(output.stdout.contains("  + welcome"));
    assert!(
        output
            .stdout
            .contains("Scanned 2 source files, 4 keys (updated 2 catalogs)")
    );

    Ok(())
}

#[test]
fn test_extract_preserves_translations() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Resources/fr.lproj/Localizable.strings",
        "\"home_title\" = \"Accueil\";\n\"obsolete\" = \"Ancien\";\n",
    )?;

    let output = run(test.extract_command().args(["--language", "fr.lproj"]))?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let catalog = test.read_file("Resources/fr.lproj/Localizable.strings")?;
    assert!(catalog.contains("\"home_title\" = \"Accueil\";"));
    assert!(!catalog.contains("obsolete"));
    assert!(output.stdout.contains("  - obsolete"));
    assert!(output.stdout.contains("  ~ home_title"));
    // Only the requested language is touched.
    assert!(!test.root().join("Resources/en.lproj/Localizable.strings").exists());

    Ok(())
}

#[test]
fn test_extract_with_comments() -> Result<()> {
    let test = project()?;

    let output = run(test
        .extract_command()
        .args(["--language", "en.lproj", "--comments"]))?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let catalog = test.read_file("Resources/en.lproj/Localizable.strings")?;
    assert!(catalog.contains("/* Greeting on the home screen */\n\"welcome\" = \"welcome\";"));
    assert!(catalog.contains("/* home_title */\n\"home_title\" = \"home_title\";"));

    Ok(())
}

#[test]
fn test_extract_check_fails_with_pending_changes() -> Result<()> {
    let test = project()?;

    let output = run(test.extract_command().args(["--check", "--dry-run"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("dry run, no catalogs written"));
    assert!(!test.root().join("Resources/en.lproj/Localizable.strings").exists());

    Ok(())
}

#[test]
fn test_extract_check_passes_once_in_sync() -> Result<()> {
    let test = project()?;
    run(&mut test.extract_command())?;

    let output = run(test.extract_command().arg("--check"))?;

    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("en.lproj: 0 new, 0 missing, 0 changed, 0 excluded"));

    Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Resources/en.lproj/Localizable.stringsdict",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>logout</key>
    <dict>
        <key>NSStringLocalizedFormatKey</key>
        <string>%#@value@</string>
    </dict>
</dict>
</plist>
"#,
    )?;

    let output = run(test
        .extract_command()
        .args(["--json", "--dry-run", "--language", "en.lproj"]))?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let report: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["status"], "completed");
    assert_eq!(report["sourceFilesScanned"], 2);
    assert_eq!(report["keysExtracted"], 3);
    let summary = &report["languages"][0]["summary"];
    assert_eq!(
        summary["new"],
        serde_json::json!(["home_title", "settings_title", "welcome"])
    );
    assert_eq!(summary["duplicateFormatExcluded"], serde_json::json!(["logout"]));
    assert_eq!(report["languages"][0]["written"], false);

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        "Sources/Main.swift",
        r#"let text = AppLocalizedString("done", comment: "Done button")"#,
    )?;
    test.write_file(
        ".strsyncrc.json",
        r#"{
  "sourceRoot": "./Sources",
  "catalogDir": "./Localization",
  "languages": ["de.lproj"],
  "usageExample": "AppLocalizedString(\"key\", comment: \"comment\")",
  "includeComments": true
}"#,
    )?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("Localization/de.lproj/Localizable.strings")?,
        "\n/* ===== Main.swift ===== */\n/* Done button */\n\"done\" = \"done\";\n"
    );

    Ok(())
}

#[test]
fn test_extract_cli_flags_override_config() -> Result<()> {
    let test = CliTest::with_file("Sources/Main.swift", r#"tr("greeting")"#)?;
    test.write_file(".strsyncrc.json", r#"{ "languages": ["de.lproj"] }"#)?;

    let output = run(test.extract_command().args([
        "--source-root",
        "Sources",
        "--language",
        "it.lproj",
        "--catalog-file",
        "Main.strings",
        "--pattern",
        r#"tr\("([^"]+)"\)"#,
    ]))?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(
        test.read_file("Resources/it.lproj/Main.strings")?
            .contains("\"greeting\" = \"greeting\";")
    );
    assert!(!test.root().join("Resources/de.lproj").exists());

    Ok(())
}

#[test]
fn test_extract_invalid_pattern_is_reported_and_skipped() -> Result<()> {
    let test = project()?;

    let output = run(test.extract_command().args([
        "--language",
        "en.lproj",
        "--pattern",
        "([unclosed",
        "--pattern",
        r#""([^"]+)"\.localized"#,
    ]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stderr.contains("warning: Skipping invalid pattern '([unclosed'"));
    let catalog = test.read_file("Resources/en.lproj/Localizable.strings")?;
    assert!(catalog.contains("\"home_title\""));
    assert!(!catalog.contains("\"welcome\""));

    Ok(())
}

#[test]
fn test_extract_verbose_prints_progress() -> Result<()> {
    let test = project()?;

    let quiet = run(test.extract_command().arg("--dry-run"))?;
    let verbose = run(test.extract_command().args(["--dry-run", "-v"]))?;

    assert!(!quiet.stderr.contains("info:"));
    assert!(verbose.stderr.contains("info: Found 2 source file(s)"));
    assert!(verbose.stderr.contains("Note: No .strsyncrc.json found"));

    Ok(())
}

#[test]
fn test_extract_write_failure_exits_with_failure() -> Result<()> {
    let test = project()?;
    // A regular file where the language directory should be.
    test.write_file("Resources/de.lproj", "not a directory")?;

    let output = run(test
        .extract_command()
        .args(["--language", "de.lproj", "--language", "en.lproj"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: de.lproj:"));
    assert!(test.root().join("Resources/en.lproj/Localizable.strings").exists());
    assert!(output.stdout.contains("1 of 2 catalogs failed"));

    Ok(())
}

#[test]
fn test_extract_empty_source_root_aborts() -> Result<()> {
    let test = project()?;
    test.write_file(".strsyncrc.json", r#"{ "sourceRoot": "" }"#)?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("error: Source root is not set"));
    assert!(!test.root().join("Resources/en.lproj/Localizable.strings").exists());

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = project()?;
    test.write_file(".strsyncrc.json", "{ \"languages\": ")?;

    let output = run(&mut test.extract_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse config file"));

    Ok(())
}
