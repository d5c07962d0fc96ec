//! Shared test harness for E2E scenario tests.
//!
//! Wires a registry with a simple key=value extension, an in-memory export
//! target, and engine config parsed from TOML, exercising real code paths
//! across both crates.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

use lw_engine::parse::parse_field;
use lw_engine::{
    EngineConfig, ExtensionRegistry, LogParserError, LogParserResult, MockExportTarget,
    ParseDefinition, ParserExtension, RecordAccumulator,
};

static TRACING: Once = Once::new();

/// Route engine logs to the test writer as JSON lines. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Splits `key=value` tokens; `pid` must be numeric. Identity is host + pid.
pub struct KeyValueExtension;

impl ParserExtension for KeyValueExtension {
    fn name(&self) -> &str {
        "kv"
    }

    fn definition(&self) -> ParseDefinition {
        ParseDefinition::new("kv", ["host", "pid"])
    }

    fn parse_line(&self, line: &str) -> LogParserResult<HashMap<String, String>> {
        let mut fields = HashMap::new();
        for token in line.split_whitespace() {
            let (k, v) = token.split_once('=').ok_or_else(|| {
                LogParserError::string_parse(format!("token '{token}' is not key=value"))
            })?;
            fields.insert(k.to_string(), v.to_string());
        }
        if let Some(pid) = fields.get("pid") {
            parse_field::<u32>("pid", pid)?;
        }
        Ok(fields)
    }
}

/// End-to-end harness.
pub struct TestHarness {
    pub config: EngineConfig,
    pub registry: ExtensionRegistry,
    pub export: MockExportTarget,
}

impl TestHarness {
    /// Harness whose accumulator holds at most `max_records` records.
    pub fn with_record_limit(max_records: usize) -> Self {
        init_tracing();
        let config =
            EngineConfig::from_toml_str(&format!("[limits]\nmax_records = {max_records}\n"))
                .expect("valid config");

        let mut registry = ExtensionRegistry::new();
        registry.register("kv", || Ok(Box::new(KeyValueExtension)));
        registry.register("misnamed", || Ok(Box::new(KeyValueExtension)));
        registry.register("needs-args", || Err("constructor requires a grammar file".into()));

        Self {
            config,
            registry,
            export: MockExportTarget::new(),
        }
    }

    pub fn accumulator(&self) -> RecordAccumulator<HashMap<String, String>> {
        RecordAccumulator::new(self.config.limits)
    }
}

/// Owned lines from string literals.
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Sample syslog-ish batch: 4 good records, 3 bad ones.
pub fn sample_batch() -> Vec<String> {
    lines(&[
        "host=edge1 pid=1234 msg=started",
        "host=edge1 pid=1234 msg=connected",
        "host=edge1 pid=abc msg=corrupt-pid",
        "host=edge2 pid=77 msg=started",
        "pid=99 msg=no-host",
        "host=edge2 pid=77 msg=done",
        "this line is not key value",
    ])
}
