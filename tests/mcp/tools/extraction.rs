use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use strsync::mcp::{StrsyncMcpServer, types::RunExtractionParams};

use crate::{McpTestFixture, extract_tool_result_json};

fn fixture() -> McpTestFixture {
    let fixture = McpTestFixture::with_languages(&["en.lproj", "fr.lproj"]).unwrap();
    fixture
        .write_file(
            "App/Home.swift",
            r#"
            let title = "home_title".localized(comment: "Home screen title")
            let subtitle = "home_subtitle".localized
            "#,
        )
        .unwrap();
    fixture
        .write_file(
            "Resources/fr.lproj/Localizable.strings",
            "\"home_title\" = \"Accueil\";\n\"removed\" = \"Supprim\u{e9}\";\n",
        )
        .unwrap();
    fixture
        .write_config(&json!({ "sourceRoot": "./App" }))
        .unwrap();
    fixture
}

fn params(fixture: &McpTestFixture, dry_run: Option<bool>) -> Parameters<RunExtractionParams> {
    Parameters(RunExtractionParams {
        project_root_path: fixture.root(),
        dry_run,
        include_comments: None,
    })
}

#[tokio::test]
async fn test_run_extraction_updates_catalogs() {
    let fixture = fixture();
    let server = StrsyncMcpServer::new();

    let result = server.run_extraction(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let report = &json_result["report"];
    assert_eq!(report["status"], "completed");
    assert_eq!(report["languages"][0]["language"], "en.lproj");
    assert_eq!(
        report["languages"][0]["summary"]["new"],
        json!(["home_subtitle", "home_title"])
    );
    assert_eq!(report["languages"][1]["summary"]["missing"], json!(["removed"]));
    assert_eq!(report["languages"][1]["summary"]["changed"], json!(["home_title"]));
    assert!(!json_result["logs"].as_array().unwrap().is_empty());

    let fr = fixture.read_catalog("fr.lproj").unwrap();
    assert!(fr.contains("\"home_title\" = \"Accueil\";"));
    assert!(!fr.contains("removed"));
}

#[tokio::test]
async fn test_run_extraction_dry_run_writes_nothing() {
    let fixture = fixture();
    let server = StrsyncMcpServer::new();

    let result = server
        .run_extraction(params(&fixture, Some(true)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["report"]["languages"][0]["written"], false);
    assert!(fixture.read_catalog("en.lproj").is_err());
}

#[tokio::test]
async fn test_run_extraction_include_comments_override() {
    let fixture = fixture();
    let server = StrsyncMcpServer::new();

    let params = Parameters(RunExtractionParams {
        project_root_path: fixture.root(),
        dry_run: None,
        include_comments: Some(true),
    });
    server.run_extraction(params).await.unwrap();

    let en = fixture.read_catalog("en.lproj").unwrap();
    assert!(en.contains("/* Home screen title */\n\"home_title\" = \"home_title\";"));
}

#[tokio::test]
async fn test_last_run_tracks_most_recent_report() {
    let fixture = fixture();
    let server = StrsyncMcpServer::new();

    let before = extract_tool_result_json(&server.last_run().await.unwrap());
    assert!(before["lastRun"].is_null());

    server.run_extraction(params(&fixture, None)).await.unwrap();
    server.run_extraction(params(&fixture, None)).await.unwrap();

    let after = extract_tool_result_json(&server.last_run().await.unwrap());
    let summary = &after["lastRun"]["languages"][0]["summary"];
    // The second run found the catalog already in sync.
    assert_eq!(summary["new"], json!([]));
    assert_eq!(summary["missing"], json!([]));
}

#[tokio::test]
async fn test_clones_share_last_run() {
    let fixture = fixture();
    let server = StrsyncMcpServer::new();
    let clone = server.clone();

    server.run_extraction(params(&fixture, Some(true))).await.unwrap();

    let json_result = extract_tool_result_json(&clone.last_run().await.unwrap());
    assert_eq!(json_result["lastRun"]["status"], "completed");
}
