//! Cause-chain walking and diagnostic reports.

use std::error::Error as StdError;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Cause, TypedError};
use crate::kind::ErrorKind;

/// Iterator over an error and its sources, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walk `err` and everything it wraps.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// The originally detected failure at the end of the chain.
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    chain(err).last().unwrap_or(err)
}

/// Find the first link in the chain of concrete type `E`.
///
/// Looks through shared [`Cause`] wrappers, so an `io::Error` wrapped by a
/// log parser error is found as an `io::Error`.
pub fn find_cause<'a, E: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a E> {
    chain(err).find_map(|link| {
        link.downcast_ref::<E>().or_else(|| {
            link.downcast_ref::<Cause>()
                .and_then(|shared| shared.as_ref().downcast_ref::<E>())
        })
    })
}

/// A serializable snapshot of an error and its full cause chain.
///
/// `chain` holds the messages of every wrapped error below the top one,
/// outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub checked: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
    pub reported_at: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(err: &TypedError) -> Self {
        Self {
            kind: err.kind(),
            checked: err.is_checked(),
            message: err.message().to_string(),
            chain: chain(err).skip(1).map(|link| link.to_string()).collect(),
            reported_at: Utc::now(),
        }
    }

    /// Message of the deepest wrapped error, or the top message if nothing
    /// is wrapped.
    pub fn root_message(&self) -> &str {
        self.chain.last().unwrap_or(&self.message).as_str()
    }
}

impl<E> From<&E> for ErrorReport
where
    E: Clone + Into<TypedError>,
{
    fn from(err: &E) -> Self {
        Self::new(&err.clone().into())
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if !self.chain.is_empty() {
            f.write_str("\nCaused by:")?;
            for (i, link) in self.chain.iter().enumerate() {
                write!(f, "\n    {i}: {link}")?;
            }
        }
        Ok(())
    }
}
