//! Export targets: write parsed results out and read them back.

use std::sync::Arc;

use async_trait::async_trait;

use lw_errors::{LogParserError, LogParserResult};

/// Destination for exported log data, as opaque lines.
///
/// Every I/O failure surfaces as `LogDataExportToFile` wrapping the
/// original error, never as a raw I/O error.
#[async_trait]
pub trait ExportTarget: Send + Sync {
    /// Replace the contents at `path` with `lines`.
    async fn write_lines(&self, path: &str, lines: &[String]) -> LogParserResult<()>;

    /// Read back all lines previously exported to `path`.
    async fn read_lines(&self, path: &str) -> LogParserResult<Vec<String>>;

    /// Check whether `path` holds exported data.
    async fn exists(&self, path: &str) -> bool;
}

/// Exports to the local filesystem.
pub struct FileExportTarget;

#[async_trait]
impl ExportTarget for FileExportTarget {
    async fn write_lines(&self, path: &str, lines: &[String]) -> LogParserResult<()> {
        let mut content = lines.join("\n");
        if !lines.is_empty() {
            content.push('\n');
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|e| export_failed(path, e))?;
        tracing::debug!(path, lines = lines.len(), "exported log data");
        Ok(())
    }

    async fn read_lines(&self, path: &str) -> LogParserResult<Vec<String>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| import_failed(path, e))?;
        Ok(content.lines().map(String::from).collect())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

pub(crate) fn export_failed(path: &str, e: std::io::Error) -> LogParserError {
    LogParserError::export_to_file_caused_by(format!("export to {path} failed"), Arc::new(e))
}

pub(crate) fn import_failed(path: &str, e: std::io::Error) -> LogParserError {
    LogParserError::export_to_file_caused_by(format!("import from {path} failed"), Arc::new(e))
}
