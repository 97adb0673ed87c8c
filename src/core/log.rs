//! Progress/diagnostic side channel for the extraction engine.
//!
//! The engine never prints. Every message goes through a [`LogSink`], which
//! wraps an unbounded tokio channel so that sending never blocks the caller
//! and the host (CLI, MCP server) decides how and when to drain it.

use std::fmt;

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single message emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
}

/// Cloneable, non-blocking sender half of the log channel.
///
/// Delivery is best effort: once the receiver is dropped, events are
/// silently discarded.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    tx: Option<UnboundedSender<LogEvent>>,
}

impl LogSink {
    /// Create a sink together with the receiver the host drains.
    pub fn channel() -> (Self, UnboundedReceiver<LogEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops every event.
    pub fn discard() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(LogLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogLevel::Error, message.into());
    }

    fn emit(&self, level: LogLevel, message: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(LogEvent { level, message });
        }
    }
}

/// Drain every event currently buffered in `rx` without waiting.
pub fn drain(rx: &mut UnboundedReceiver<LogEvent>) -> Vec<LogEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
