//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the extraction engine to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: MCP server and tool handlers
//! - `types`: Tool parameter and result types

mod server;
pub mod types;

pub use server::{StrsyncMcpServer, run_server};
