//! Host-engine seams for logweave.
//!
//! The tokenizer and record model belong to the caller; this crate provides
//! the places where a parsing engine meets the error taxonomy: string-token
//! parsing, parse-definition checks and import/export, bounded record
//! accumulation, export targets, an extension registry, post-manipulation
//! pipelines, and the top-level boundary that catches raised defects.

pub mod accumulator;
pub mod batch;
pub mod boundary;
pub mod config;
pub mod definition;
pub mod export;
pub mod manipulation;
pub mod mock;
pub mod parse;
pub mod registry;

// Re-export key types for convenience
pub use accumulator::{RecordAccumulator, SizeHint};
pub use batch::{BatchSummary, RecordOutcome, ingest_lines};
pub use boundary::{BoundaryFailure, run_boundary};
pub use config::{EngineConfig, MemoryLimitConfig};
pub use definition::ParseDefinition;
pub use export::{ExportTarget, FileExportTarget};
pub use manipulation::{FnStep, Pipeline, PostManipulation, step_fn};
pub use mock::MockExportTarget;
pub use registry::{BoxError, ExtensionRegistry, ParserExtension};

pub use lw_errors::{
    ErrorKind, ErrorReport, LogParserDefect, LogParserError, LogParserResult, TypedError,
};
