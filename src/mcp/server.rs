use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    config::{load_config, resolve_dir},
    core::{
        ExtractionService, LogSink, detect_languages,
        log::drain,
        patterns::{default_patterns, generate_patterns},
    },
};

use super::types::{
    ConfigDto, ConfigValues, DetectLanguagesParams, GeneratePatternsParams, GetConfigParams,
    LanguagesResult, LastRunResult, PatternsResult, RunExtractionParams, RunExtractionResult,
};

#[derive(Clone)]
pub struct StrsyncMcpServer {
    tool_router: ToolRouter<Self>,
    service: ExtractionService,
}

impl Default for StrsyncMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_router]
impl StrsyncMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            service: ExtractionService::new(),
        }
    }

    /// Get project configuration
    #[tool(
        description = "Get strsync configuration (.strsyncrc.json or defaults) for a project."
    )]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            root_dir: result.root_dir.to_string_lossy().to_string(),
            config: ConfigValues::from(result.config),
        })
    }

    /// List language directories
    #[tool(
        description = "List the *.lproj language directories found in the project's catalog directory."
    )]
    pub async fn detect_languages(
        &self,
        params: Parameters<DetectLanguagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;
        let catalog_dir = params
            .0
            .catalog_dir
            .as_deref()
            .unwrap_or(&result.config.catalog_dir);
        let catalog_dir = resolve_dir(&result.root_dir, catalog_dir);

        json_result(&LanguagesResult {
            languages: detect_languages(&catalog_dir),
            catalog_dir: catalog_dir.to_string_lossy().to_string(),
        })
    }

    /// Generate extraction patterns from a usage example
    #[tool(
        description = "Generate extraction regex patterns from one example usage of the localization API. Falls back to the default patterns when nothing matches."
    )]
    pub async fn generate_patterns(
        &self,
        params: Parameters<GeneratePatternsParams>,
    ) -> Result<CallToolResult, McpError> {
        let generated = generate_patterns(&params.0.example);

        json_result(&if generated.is_empty() {
            PatternsResult {
                generated: false,
                patterns: default_patterns(),
            }
        } else {
            PatternsResult {
                generated: true,
                patterns: generated,
            }
        })
    }

    /// Run an extraction
    #[tool(
        description = "Extract localization keys from the project's sources and update every language catalog. Returns per-language new/missing/changed keys plus the run's log messages. Use dryRun to preview."
    )]
    pub async fn run_extraction(
        &self,
        params: Parameters<RunExtractionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let path = Path::new(&params.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;
        let mut config = result.config;
        if let Some(include_comments) = params.include_comments {
            config.include_comments = include_comments;
        }

        let (sink, mut rx) = LogSink::channel();
        let request =
            config.extraction_request(&result.root_dir, params.dry_run.unwrap_or(false), &sink);
        let report = self.service.run(request, sink).await;

        json_result(&RunExtractionResult {
            report,
            logs: drain(&mut rx),
        })
    }

    /// Get the most recent run report
    #[tool(
        description = "Get the report of the most recent run_extraction call in this session (null if none)."
    )]
    pub async fn last_run(&self) -> Result<CallToolResult, McpError> {
        json_result(&LastRunResult {
            last_run: self.service.last_run().await,
        })
    }
}

#[tool_handler]
impl ServerHandler for StrsyncMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "strsync MCP keeps Apple .strings catalogs in sync with the keys used in source code.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. detect_languages - List *.lproj language directories\n\
                 3. generate_patterns - Derive extraction patterns from an example usage\n\
                 4. run_extraction - Extract keys and update catalogs (supports dryRun)\n\
                 5. last_run - Get the report of the most recent run\n\n\
                 Recommended Workflow:\n\
                 1. Use get_config and detect_languages to check the setup\n\
                 2. Run run_extraction with dryRun=true to preview new/missing/changed keys\n\
                 3. Run run_extraction without dryRun to write the catalogs"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = StrsyncMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
