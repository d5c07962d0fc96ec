//! Parse definitions: the key fields that identify a parsed entry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lw_errors::{LogParserDefect, LogParserError, LogParserResult};

/// Names the fields that together identify a parsed log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDefinition {
    pub name: String,
    pub keys: Vec<String>,
}

impl ParseDefinition {
    pub fn new<K>(name: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that every declared key appears among the parsed keys.
    ///
    /// Fails on the first missing key, in declaration order.
    pub fn validate_keys<S: AsRef<str>>(&self, parsed_keys: &[S]) -> LogParserResult<()> {
        if self.keys.is_empty() {
            return Err(LogParserError::incorrect_parse_definition(format!(
                "parse definition '{}' declares no key fields",
                self.name
            )));
        }
        let parsed: HashSet<&str> = parsed_keys.iter().map(AsRef::as_ref).collect();
        match self.keys.iter().find(|k| !parsed.contains(k.as_str())) {
            Some(missing) => Err(missing_key(missing)),
            None => Ok(()),
        }
    }

    /// Extract the identity values of a parsed record, in key order.
    pub fn key_values<'a>(
        &self,
        record: &'a HashMap<String, String>,
    ) -> LogParserResult<Vec<&'a str>> {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        self.validate_keys(keys.as_slice())?;
        Ok(self
            .keys
            .iter()
            .filter_map(|k| record.get(k).map(String::as_str))
            .collect())
    }

    /// Serialize to JSON, raising on failure.
    pub fn export_json(&self) -> String {
        self.try_export_json().unwrap_or_else(|defect| defect.raise())
    }

    pub fn try_export_json(&self) -> Result<String, LogParserDefect> {
        self.check_round_trip()?;
        serde_json::to_string(self).map_err(|e| {
            LogParserDefect::definition_import_export_caused_by(
                format!("cannot export parse definition '{}'", self.name),
                Arc::new(e),
            )
        })
    }

    /// Deserialize from JSON, raising on failure.
    pub fn import_json(json: &str) -> Self {
        Self::try_import_json(json).unwrap_or_else(|defect| defect.raise())
    }

    pub fn try_import_json(json: &str) -> Result<Self, LogParserDefect> {
        let definition: Self = serde_json::from_str(json).map_err(|e| {
            LogParserDefect::definition_import_export_caused_by(
                "cannot import parse definition",
                Arc::new(e),
            )
        })?;
        definition.check_round_trip()?;
        Ok(definition)
    }

    /// A definition survives export/import only if its name and keys are
    /// non-empty and its keys are distinct.
    fn check_round_trip(&self) -> Result<(), LogParserDefect> {
        if self.name.trim().is_empty() {
            return Err(LogParserDefect::definition_import_export(
                "parse definition has an empty name",
            ));
        }
        let mut seen = HashSet::new();
        for key in &self.keys {
            if key.is_empty() {
                return Err(LogParserDefect::definition_import_export(format!(
                    "parse definition '{}' has an empty key",
                    self.name
                )));
            }
            if !seen.insert(key.as_str()) {
                return Err(LogParserDefect::definition_import_export(format!(
                    "parse definition '{}' declares key '{key}' twice",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn missing_key(key: &str) -> LogParserError {
    LogParserError::incorrect_parse_definition(format!("field '{key}' not found in parsed keys"))
}
