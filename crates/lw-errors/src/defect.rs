//! Unchecked log parser defects.
//!
//! A defect signals a programming or integration mistake. It is raised with
//! [`LogParserDefect::raise`], which unwinds the stack carrying the defect as
//! its payload, so no function signature in between has to mention it. The
//! nearest boundary catches the unwind and recovers the value with
//! [`LogParserDefect::from_panic`]. Code that would rather inspect the defect
//! itself uses the `try_*` operations of the host engine, which return it in a
//! `Result` instead.

use std::any::Any;

use thiserror::Error;

use crate::error::Cause;
use crate::kind::ErrorKind;

/// Errors that abort the current operation and surface at a boundary.
#[derive(Debug, Clone, Error)]
pub enum LogParserDefect {
    #[error("{message}")]
    PostManipulation {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("{message}")]
    SdkDefinition {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("{message}")]
    MemoryLimitExceeded { message: String },

    #[error("{message}")]
    DefinitionImportExport {
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl LogParserDefect {
    pub fn post_manipulation(message: impl Into<String>) -> Self {
        Self::PostManipulation {
            message: message.into(),
            cause: None,
        }
    }

    pub fn post_manipulation_caused_by(message: impl Into<String>, cause: Cause) -> Self {
        Self::PostManipulation {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn sdk_definition(message: impl Into<String>) -> Self {
        Self::SdkDefinition {
            message: message.into(),
            cause: None,
        }
    }

    pub fn sdk_definition_caused_by(message: impl Into<String>, cause: Cause) -> Self {
        Self::SdkDefinition {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn memory_limit_exceeded(message: impl Into<String>) -> Self {
        Self::MemoryLimitExceeded {
            message: message.into(),
        }
    }

    pub fn definition_import_export(message: impl Into<String>) -> Self {
        Self::DefinitionImportExport {
            message: message.into(),
            cause: None,
        }
    }

    pub fn definition_import_export_caused_by(message: impl Into<String>, cause: Cause) -> Self {
        Self::DefinitionImportExport {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PostManipulation { .. } => ErrorKind::LogParserPostManipulation,
            Self::SdkDefinition { .. } => ErrorKind::LogParserSdkDefinition,
            Self::MemoryLimitExceeded { .. } => ErrorKind::MemoryLimitExceeded,
            Self::DefinitionImportExport { .. } => ErrorKind::ParseDefinitionImportExport,
        }
    }

    /// The message exactly as supplied by the raiser.
    pub fn message(&self) -> &str {
        match self {
            Self::PostManipulation { message, .. }
            | Self::SdkDefinition { message, .. }
            | Self::MemoryLimitExceeded { message }
            | Self::DefinitionImportExport { message, .. } => message,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::PostManipulation { cause, .. }
            | Self::SdkDefinition { cause, .. }
            | Self::DefinitionImportExport { cause, .. } => cause.as_ref(),
            Self::MemoryLimitExceeded { .. } => None,
        }
    }

    /// Abort the current operation, unwinding to the nearest boundary.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }

    /// Recover a defect from an unwind payload.
    ///
    /// Payloads of any other panic are handed back untouched so the caller
    /// can resume them.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        payload.downcast::<Self>().map(|defect| *defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;
    use std::panic;
    use std::sync::Arc;

    fn message_only(kind: ErrorKind) -> LogParserDefect {
        match kind {
            ErrorKind::LogParserPostManipulation => LogParserDefect::post_manipulation("defect"),
            ErrorKind::LogParserSdkDefinition => LogParserDefect::sdk_definition("defect"),
            ErrorKind::MemoryLimitExceeded => LogParserDefect::memory_limit_exceeded("defect"),
            ErrorKind::ParseDefinitionImportExport => {
                LogParserDefect::definition_import_export("defect")
            }
            other => panic!("{other} is a checked kind"),
        }
    }

    fn with_cause(kind: ErrorKind, cause: Cause) -> LogParserDefect {
        match kind {
            ErrorKind::LogParserPostManipulation => {
                LogParserDefect::post_manipulation_caused_by("wrapped", cause)
            }
            ErrorKind::LogParserSdkDefinition => {
                LogParserDefect::sdk_definition_caused_by("wrapped", cause)
            }
            ErrorKind::ParseDefinitionImportExport => {
                LogParserDefect::definition_import_export_caused_by("wrapped", cause)
            }
            other => panic!("{other} does not wrap a cause"),
        }
    }

    #[test]
    fn message_constructors_keep_message_and_have_no_cause() {
        for kind in ErrorKind::UNCHECKED {
            let defect = message_only(kind);
            assert_eq!(defect.kind(), kind);
            assert_eq!(defect.message(), "defect");
            assert_eq!(defect.to_string(), "defect");
            assert!(defect.cause().is_none());
            assert!(defect.source().is_none());
        }
    }

    #[test]
    fn cause_constructors_keep_identical_cause() {
        for kind in ErrorKind::UNCHECKED
            .into_iter()
            .filter(ErrorKind::accepts_cause)
        {
            let cause: Cause = Arc::new(io::Error::other("lower level failure"));
            let defect = with_cause(kind, cause.clone());
            assert_eq!(defect.kind(), kind);
            assert_eq!(defect.message(), "wrapped");
            assert!(Arc::ptr_eq(defect.cause().unwrap(), &cause));
            assert_eq!(defect.cause().unwrap().to_string(), "lower level failure");
            assert_eq!(defect.source().unwrap().to_string(), "lower level failure");
        }
    }

    #[test]
    fn raise_unwinds_with_defect_payload() {
        let payload = panic::catch_unwind::<_, ()>(|| {
            LogParserDefect::memory_limit_exceeded("record limit of 10 exceeded").raise()
        })
        .unwrap_err();
        let defect = LogParserDefect::from_panic(payload).unwrap();
        assert_eq!(defect.kind(), ErrorKind::MemoryLimitExceeded);
        assert_eq!(defect.message(), "record limit of 10 exceeded");
    }

    #[test]
    fn foreign_panic_payload_is_handed_back() {
        let payload = panic::catch_unwind::<_, ()>(|| panic!("ordinary bug")).unwrap_err();
        let back = LogParserDefect::from_panic(payload).unwrap_err();
        assert_eq!(back.downcast_ref::<&str>(), Some(&"ordinary bug"));
    }

    #[test]
    fn defects_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<LogParserDefect>();
    }
}
