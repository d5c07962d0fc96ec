//! Checked log parser errors.

use std::sync::Arc;

use thiserror::Error;

use crate::defect::LogParserDefect;
use crate::kind::ErrorKind;

/// A wrapped lower-level failure.
///
/// Shared ownership keeps the original error's identity: cloning a wrapper
/// clones the pointer, never the cause.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable errors that every caller has to branch on.
#[derive(Debug, Clone, Error)]
pub enum LogParserError {
    #[error("{message}")]
    IncorrectParseDefinition { message: String },

    #[error("{message}")]
    LogDataExportToFile {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("{message}")]
    StringParse { message: String },
}

/// Convenience alias for results that can fail with a checked error.
pub type LogParserResult<T> = Result<T, LogParserError>;

impl LogParserError {
    pub fn incorrect_parse_definition(message: impl Into<String>) -> Self {
        Self::IncorrectParseDefinition {
            message: message.into(),
        }
    }

    pub fn export_to_file(message: impl Into<String>) -> Self {
        Self::LogDataExportToFile {
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap an I/O (or other lower-level) failure hit while importing or
    /// exporting parsed data.
    pub fn export_to_file_caused_by(message: impl Into<String>, cause: Cause) -> Self {
        Self::LogDataExportToFile {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn string_parse(message: impl Into<String>) -> Self {
        Self::StringParse {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncorrectParseDefinition { .. } => ErrorKind::IncorrectParseDefinition,
            Self::LogDataExportToFile { .. } => ErrorKind::LogDataExportToFile,
            Self::StringParse { .. } => ErrorKind::StringParse,
        }
    }

    /// The message exactly as supplied by the raiser.
    pub fn message(&self) -> &str {
        match self {
            Self::IncorrectParseDefinition { message }
            | Self::LogDataExportToFile { message, .. }
            | Self::StringParse { message } => message,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::LogDataExportToFile { cause, .. } => cause.as_ref(),
            Self::IncorrectParseDefinition { .. } | Self::StringParse { .. } => None,
        }
    }
}

/// Either class of error, for code that reports both uniformly.
#[derive(Debug, Clone, Error)]
pub enum TypedError {
    #[error(transparent)]
    Checked(#[from] LogParserError),

    #[error(transparent)]
    Defect(#[from] LogParserDefect),
}

impl TypedError {
    /// Build a message-only error of any kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        match kind {
            ErrorKind::IncorrectParseDefinition => {
                LogParserError::incorrect_parse_definition(message).into()
            }
            ErrorKind::LogDataExportToFile => LogParserError::export_to_file(message).into(),
            ErrorKind::StringParse => LogParserError::string_parse(message).into(),
            ErrorKind::LogParserPostManipulation => {
                LogParserDefect::post_manipulation(message).into()
            }
            ErrorKind::LogParserSdkDefinition => LogParserDefect::sdk_definition(message).into(),
            ErrorKind::MemoryLimitExceeded => {
                LogParserDefect::memory_limit_exceeded(message).into()
            }
            ErrorKind::ParseDefinitionImportExport => {
                LogParserDefect::definition_import_export(message).into()
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Checked(e) => e.kind(),
            Self::Defect(d) => d.kind(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Checked(e) => e.message(),
            Self::Defect(d) => d.message(),
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::Checked(e) => e.cause(),
            Self::Defect(d) => d.cause(),
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    fn message_only(kind: ErrorKind) -> LogParserError {
        match kind {
            ErrorKind::IncorrectParseDefinition => {
                LogParserError::incorrect_parse_definition("bad definition")
            }
            ErrorKind::LogDataExportToFile => LogParserError::export_to_file("bad definition"),
            ErrorKind::StringParse => LogParserError::string_parse("bad definition"),
            other => panic!("{other} is not a checked kind"),
        }
    }

    #[test]
    fn message_constructors_keep_message_and_have_no_cause() {
        for kind in ErrorKind::CHECKED {
            let err = message_only(kind);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "bad definition");
            assert_eq!(err.to_string(), "bad definition");
            assert!(err.cause().is_none());
            assert!(err.source().is_none());
        }
    }

    #[test]
    fn export_keeps_identical_cause() {
        let cause: Cause = Arc::new(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let err = LogParserError::export_to_file_caused_by("export failed", cause.clone());

        assert_eq!(err.message(), "export failed");
        let kept = err.cause().unwrap();
        assert!(Arc::ptr_eq(kept, &cause));
        assert_eq!(kept.to_string(), "no such file");
        assert_eq!(err.source().unwrap().to_string(), "no such file");
    }

    #[test]
    fn cause_is_downcastable() {
        let err = LogParserError::export_to_file_caused_by(
            "import failed",
            Arc::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        let io_err = err.cause().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn clone_shares_cause() {
        let cause: Cause = Arc::new(io::Error::other("disk full"));
        let err = LogParserError::export_to_file_caused_by("export failed", cause.clone());
        let copy = err.clone();
        assert!(Arc::ptr_eq(copy.cause().unwrap(), &cause));
    }

    #[test]
    fn typed_error_new_covers_every_kind() {
        for kind in ErrorKind::ALL {
            let err = TypedError::new(kind, "boom");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "boom");
            assert_eq!(err.is_checked(), kind.is_checked());
            assert!(err.cause().is_none());
        }
    }

    #[test]
    fn typed_error_is_transparent() {
        let cause: Cause = Arc::new(io::Error::other("root"));
        let err: TypedError = LogParserError::export_to_file_caused_by("outer", cause).into();
        assert_eq!(err.to_string(), "outer");
        assert_eq!(err.source().unwrap().to_string(), "root");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<LogParserError>();
        assert_send_sync::<TypedError>();
    }
}
