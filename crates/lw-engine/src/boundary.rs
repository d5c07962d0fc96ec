//! Top-level boundary where raised defects come to rest.
//!
//! A defect raised anywhere inside the boundary unwinds to here, gets logged
//! once with its full cause chain, and is reported to the boundary's caller
//! as a [`BoundaryFailure`]. Panics that are not defects are resumed
//! untouched.
//!
//! The process panic hook is wrapped once so that a defect raised inside a
//! boundary is not also printed to stderr. Defects raised outside any
//! boundary, and every other panic, still reach the previous hook.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use serde::Serialize;
use uuid::Uuid;

use lw_errors::{ErrorKind, ErrorReport, LogParserDefect};

/// A batch operation aborted by a defect.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("operation '{operation}' aborted: {defect}")]
pub struct BoundaryFailure {
    /// Identifies this run in logs.
    pub run_id: Uuid,
    pub operation: String,
    #[serde(skip)]
    #[source]
    pub defect: LogParserDefect,
    pub report: ErrorReport,
}

impl BoundaryFailure {
    pub fn kind(&self) -> ErrorKind {
        self.defect.kind()
    }
}

thread_local! {
    static BOUNDARY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !reported_by_boundary(info.payload()) {
                previous(info);
            }
        }));
    });
}

/// True when `payload` is a defect that an enclosing boundary on this thread
/// will catch and log.
fn reported_by_boundary(payload: &(dyn Any + Send)) -> bool {
    payload.is::<LogParserDefect>() && BOUNDARY_DEPTH.with(Cell::get) > 0
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Run `operation` and catch any defect it raises.
pub fn run_boundary<T, F>(operation: &str, f: F) -> Result<T, BoundaryFailure>
where
    F: FnOnce() -> T,
{
    install_quiet_hook();
    let run_id = Uuid::now_v7();
    tracing::debug!(%run_id, operation, "boundary entered");

    let caught = {
        let _depth = DepthGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    let payload = match caught {
        Ok(value) => return Ok(value),
        Err(payload) => payload,
    };
    let defect = match LogParserDefect::from_panic(payload) {
        Ok(defect) => defect,
        Err(other) => panic::resume_unwind(other),
    };

    let report = ErrorReport::from(&defect);
    tracing::error!(
        %run_id,
        operation,
        kind = %defect.kind(),
        "operation aborted by defect:\n{report}"
    );
    Err(BoundaryFailure {
        run_id,
        operation: operation.to_string(),
        defect,
        report,
    })
}
