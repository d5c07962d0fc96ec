//! E2E test for the structured log record a boundary emits.

use std::io;
use std::sync::{Arc, Mutex};

use lw_engine::{LogParserDefect, run_boundary};

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// A caught defect is logged exactly once, as one JSON record carrying the
/// operation, the kind and the rendered cause chain.
#[test]
fn e2e_boundary_logs_defect_as_json() {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::ERROR)
        .with_writer(move || writer.clone())
        .finish();

    let failure = tracing::subscriber::with_default(subscriber, || {
        run_boundary::<(), _>("export-batch", || {
            LogParserDefect::post_manipulation_caused_by(
                "step 'rollup' failed",
                Arc::new(io::Error::other("pipe closed")),
            )
            .raise()
        })
    })
    .unwrap_err();

    let records = sink.lines();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["fields"]["operation"], "export-batch");
    assert_eq!(record["fields"]["kind"], "log_parser_post_manipulation");
    assert_eq!(record["fields"]["run_id"], failure.run_id.to_string());

    let message = record["fields"]["message"].as_str().unwrap();
    assert!(message.contains("step 'rollup' failed"));
    assert!(message.contains("0: pipe closed"));
}
