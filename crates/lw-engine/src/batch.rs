//! Batch ingestion: per-record outcomes for checked failures.
//!
//! A checked failure on one line skips that record and the batch carries on.
//! Defects (a crossed memory ceiling, say) are not handled here; they unwind
//! to the enclosing boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lw_errors::{ErrorKind, LogParserError, chain};

use crate::accumulator::RecordAccumulator;
use crate::registry::ParserExtension;

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    Accepted {
        line_number: usize,
    },
    Skipped {
        line_number: usize,
        kind: ErrorKind,
        message: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        chain: Vec<String>,
    },
}

impl RecordOutcome {
    pub fn skipped(line_number: usize, err: &LogParserError) -> Self {
        Self::Skipped {
            line_number,
            kind: err.kind(),
            message: err.message().to_string(),
            chain: chain(err).skip(1).map(|e| e.to_string()).collect(),
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Self::Accepted { line_number } | Self::Skipped { line_number, .. } => *line_number,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Outcomes of one ingestion pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub accepted: usize,
    pub skipped: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchSummary {
    pub fn push(&mut self, outcome: RecordOutcome) {
        if outcome.is_accepted() {
            self.accepted += 1;
        } else {
            self.skipped += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Skipped outcomes only.
    pub fn skipped_outcomes(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_accepted())
    }
}

/// Parse each non-empty line with `extension`, check it against the
/// extension's parse definition, and accumulate the accepted records.
///
/// Line numbers are 1-based. Raises `MemoryLimitExceeded` from the push that
/// crosses the accumulator's ceiling.
pub fn ingest_lines(
    extension: &dyn ParserExtension,
    lines: &[String],
    acc: &mut RecordAccumulator<HashMap<String, String>>,
) -> BatchSummary {
    let definition = extension.definition();
    let mut summary = BatchSummary::default();

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = i + 1;
        let parsed = extension.parse_line(line).and_then(|fields| {
            definition.key_values(&fields)?;
            Ok(fields)
        });
        match parsed {
            Ok(fields) => {
                acc.push(fields);
                summary.push(RecordOutcome::Accepted { line_number });
            }
            Err(e) => {
                tracing::debug!(
                    line_number,
                    kind = %e.kind(),
                    error = %e,
                    "record skipped"
                );
                summary.push(RecordOutcome::skipped(line_number, &e));
            }
        }
    }

    tracing::info!(
        extension = extension.name(),
        accepted = summary.accepted,
        skipped = summary.skipped,
        "batch ingested"
    );
    summary
}
