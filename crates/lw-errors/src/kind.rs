//! The closed set of error kinds and their checked/unchecked class.

use serde::{Deserialize, Serialize};

/// Every failure the log parser can report.
///
/// The first three kinds are checked: they stem from input or environment
/// problems a caller can recover from per call site. The rest are defects
/// that abort the current operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Key columns of a parse definition don't match the parsed data shape.
    IncorrectParseDefinition,
    /// Reading or writing parsed results from/to a file failed.
    LogDataExportToFile,
    /// A raw token doesn't conform to the pattern expected for its field.
    StringParse,
    /// A transformation applied after parsing failed.
    LogParserPostManipulation,
    /// A caller-supplied extension cannot be instantiated or is malformed.
    LogParserSdkDefinition,
    /// Accumulated records would cross the configured memory ceiling.
    MemoryLimitExceeded,
    /// A parse-definition extension failed to instantiate or (de)serialize.
    ParseDefinitionImportExport,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        Self::IncorrectParseDefinition,
        Self::LogDataExportToFile,
        Self::StringParse,
        Self::LogParserPostManipulation,
        Self::LogParserSdkDefinition,
        Self::MemoryLimitExceeded,
        Self::ParseDefinitionImportExport,
    ];

    /// Kinds carried by [`crate::LogParserError`].
    pub const CHECKED: [ErrorKind; 3] = [
        Self::IncorrectParseDefinition,
        Self::LogDataExportToFile,
        Self::StringParse,
    ];

    /// Kinds carried by [`crate::LogParserDefect`].
    pub const UNCHECKED: [ErrorKind; 4] = [
        Self::LogParserPostManipulation,
        Self::LogParserSdkDefinition,
        Self::MemoryLimitExceeded,
        Self::ParseDefinitionImportExport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncorrectParseDefinition => "incorrect_parse_definition",
            Self::LogDataExportToFile => "log_data_export_to_file",
            Self::StringParse => "string_parse",
            Self::LogParserPostManipulation => "log_parser_post_manipulation",
            Self::LogParserSdkDefinition => "log_parser_sdk_definition",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::ParseDefinitionImportExport => "parse_definition_import_export",
        }
    }

    /// Whether the caller must handle this kind at the call site.
    pub fn is_checked(&self) -> bool {
        matches!(
            self,
            Self::IncorrectParseDefinition | Self::LogDataExportToFile | Self::StringParse
        )
    }

    /// Whether errors of this kind can be built around a lower-level cause.
    pub fn accepts_cause(&self) -> bool {
        matches!(
            self,
            Self::LogDataExportToFile
                | Self::LogParserPostManipulation
                | Self::LogParserSdkDefinition
                | Self::ParseDefinitionImportExport
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
