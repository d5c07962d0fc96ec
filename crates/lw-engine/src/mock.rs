//! Mock export target for testing. Keeps exported lines in memory.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lw_errors::LogParserResult;

use crate::export::{ExportTarget, export_failed, import_failed};

/// An in-memory export target.
///
/// Thread-safe via `Mutex` (fine for test contexts). Paths marked read-only
/// reject writes with a `PermissionDenied` I/O error, wrapped the same way
/// the file target wraps it.
pub struct MockExportTarget {
    files: Mutex<HashMap<String, Vec<String>>>,
    read_only: HashSet<String>,
}

impl MockExportTarget {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            read_only: HashSet::new(),
        }
    }

    /// Pre-load a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), lines);
    }

    /// Make writes to `path` fail.
    pub fn with_read_only(mut self, path: impl Into<String>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    /// Lines currently stored at `path`.
    pub fn contents(&self, path: &str) -> Option<Vec<String>> {
        self.files().get(path).cloned()
    }

    // Poisoning is ignored: every write replaces a whole entry.
    fn files(&self) -> MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockExportTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExportTarget for MockExportTarget {
    async fn write_lines(&self, path: &str, lines: &[String]) -> LogParserResult<()> {
        if self.read_only.contains(path) {
            return Err(export_failed(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only export target"),
            ));
        }
        self.files().insert(path.to_string(), lines.to_vec());
        Ok(())
    }

    async fn read_lines(&self, path: &str) -> LogParserResult<Vec<String>> {
        self.contents(path).ok_or_else(|| {
            import_failed(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such export"),
            )
        })
    }

    async fn exists(&self, path: &str) -> bool {
        self.files().contains_key(path)
    }
}
