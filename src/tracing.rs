//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging caret
//! movement and state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret=debug,message=debug` - scoped filtering
//! - `RUST_LOG=plaintext_editor::registry=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/plaintext-editor/logs/plaintext-editor.log`
//! with daily rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::Document;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr and respects RUST_LOG (default `warn`).
/// File logging writes to the config directory's `logs/` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the caret location for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub row: usize,
    pub token: usize,
    pub offset: Option<usize>,
    pub row_count: usize,
}

impl CaretSnapshot {
    pub fn from_document(doc: &Document) -> Self {
        let offset = if doc.current_row_index() < doc.row_count()
            && doc.current_token_index() < doc.current_row().len()
        {
            doc.current_token().caret_offset()
        } else {
            None
        };
        Self {
            row: doc.current_row_index(),
            token: doc.current_token_index(),
            offset,
            row_count: doc.row_count(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }
        if (self.row, self.token, self.offset) != (other.row, other.token, other.offset) {
            changes.push(format!(
                "caret: ({},{},{:?}) → ({},{},{:?})",
                self.row, self.token, self.offset, other.row, other.token, other.offset
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
