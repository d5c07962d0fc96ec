//! Bounded in-memory accumulation of parsed records.
//!
//! The bound is checked before every push, so a [`MemoryLimitExceeded`]
//! defect always fires on the exact call that would cross the ceiling, with
//! the caller's stack still intact.
//!
//! [`MemoryLimitExceeded`]: lw_errors::ErrorKind::MemoryLimitExceeded

use std::collections::HashMap;

use lw_errors::LogParserDefect;

use crate::config::MemoryLimitConfig;

/// Approximate heap footprint of a record, in bytes.
pub trait SizeHint {
    fn approx_bytes(&self) -> usize;
}

impl SizeHint for str {
    fn approx_bytes(&self) -> usize {
        self.len()
    }
}

impl SizeHint for String {
    fn approx_bytes(&self) -> usize {
        self.len()
    }
}

impl SizeHint for Vec<u8> {
    fn approx_bytes(&self) -> usize {
        self.len()
    }
}

impl<T: SizeHint + ?Sized> SizeHint for &T {
    fn approx_bytes(&self) -> usize {
        (**self).approx_bytes()
    }
}

impl<K: SizeHint, V: SizeHint, S> SizeHint for HashMap<K, V, S> {
    fn approx_bytes(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.approx_bytes() + v.approx_bytes())
            .sum()
    }
}

impl SizeHint for serde_json::Value {
    fn approx_bytes(&self) -> usize {
        use serde_json::Value;
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) => 8,
            Value::String(s) => s.len(),
            Value::Array(items) => items.iter().map(SizeHint::approx_bytes).sum(),
            Value::Object(map) => map.iter().map(|(k, v)| k.len() + v.approx_bytes()).sum(),
        }
    }
}

/// Collects records up to a configured ceiling.
#[derive(Debug)]
pub struct RecordAccumulator<T> {
    records: Vec<T>,
    bytes: usize,
    limit: MemoryLimitConfig,
}

impl<T: SizeHint> RecordAccumulator<T> {
    pub fn new(limit: MemoryLimitConfig) -> Self {
        Self {
            records: Vec::new(),
            bytes: 0,
            limit,
        }
    }

    /// Store a record, or return the defect if it would cross the ceiling.
    ///
    /// A rejected record is dropped; the accumulator is left unchanged.
    pub fn try_push(&mut self, record: T) -> Result<(), LogParserDefect> {
        if self.records.len() >= self.limit.max_records {
            return Err(LogParserDefect::memory_limit_exceeded(format!(
                "record limit of {} exceeded",
                self.limit.max_records
            )));
        }
        let size = record.approx_bytes();
        if let Some(max_bytes) = self.limit.max_bytes
            && self.bytes.saturating_add(size) > max_bytes
        {
            return Err(LogParserDefect::memory_limit_exceeded(format!(
                "size limit of {max_bytes} bytes exceeded: {} held, record of {size}",
                self.bytes
            )));
        }
        self.bytes += size;
        self.records.push(record);
        Ok(())
    }

    /// Store a record, raising `MemoryLimitExceeded` if it would cross the
    /// ceiling.
    pub fn push(&mut self, record: T) {
        if let Err(defect) = self.try_push(record) {
            defect.raise();
        }
    }
}

impl<T> RecordAccumulator<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn approx_bytes(&self) -> usize {
        self.bytes
    }

    pub fn limit(&self) -> MemoryLimitConfig {
        self.limit
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}
