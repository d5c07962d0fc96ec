//! Error taxonomy for the logweave log-parsing pipeline.
//!
//! Errors fall into two classes. Checked conditions ([`LogParserError`]) come
//! from bad input or a bad environment and travel in `Result`, so every call
//! site has to branch on them. Defects ([`LogParserDefect`]) come from
//! programming or integration mistakes; they are raised from any depth and
//! recovered only at a top-level boundary.
//!
//! Both classes can wrap a lower-level [`Cause`], and the [`chain`] module
//! walks and renders the resulting cause chain.

pub mod chain;
pub mod defect;
pub mod error;
pub mod kind;

// Re-export key types for convenience
pub use chain::{Chain, ErrorReport, chain, find_cause, root_cause};
pub use defect::LogParserDefect;
pub use error::{Cause, LogParserError, LogParserResult, TypedError};
pub use kind::ErrorKind;
