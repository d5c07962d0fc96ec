//! Registry of caller-supplied parser extensions and parse definitions.
//!
//! Extensions are registered as factories and instantiated by name when a
//! batch needs them. A factory that fails, or produces a malformed
//! extension, is an integration defect rather than bad input.

use std::collections::HashMap;
use std::sync::Arc;

use lw_errors::{LogParserDefect, LogParserResult};

use crate::definition::ParseDefinition;

/// Boxed error returned by caller-supplied factories and steps.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A pluggable tokenizer that turns one raw line into named fields.
pub trait ParserExtension: Send + Sync {
    /// Name the extension was registered under.
    fn name(&self) -> &str;

    /// Key fields that identify an entry produced by this extension.
    fn definition(&self) -> ParseDefinition;

    /// Split a raw line into fields.
    fn parse_line(&self, line: &str) -> LogParserResult<HashMap<String, String>>;
}

type ExtensionFactory =
    Box<dyn Fn() -> Result<Box<dyn ParserExtension>, BoxError> + Send + Sync>;
type DefinitionFactory = Box<dyn Fn() -> Result<ParseDefinition, BoxError> + Send + Sync>;

/// Extension and definition factories, indexed by name.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, ExtensionFactory>,
    definitions: HashMap<String, DefinitionFactory>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension factory. A later registration under the same
    /// name replaces the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ParserExtension>, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(extension = %name, "registered parser extension");
        self.extensions.insert(name, Box::new(factory));
    }

    /// Register a parse-definition factory.
    pub fn register_definition<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<ParseDefinition, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(definition = %name, "registered parse definition");
        self.definitions.insert(name, Box::new(factory));
    }

    /// Instantiate an extension, raising `LogParserSDKDefinition` on failure.
    pub fn instantiate(&self, name: &str) -> Box<dyn ParserExtension> {
        self.try_instantiate(name)
            .unwrap_or_else(|defect| defect.raise())
    }

    pub fn try_instantiate(&self, name: &str) -> Result<Box<dyn ParserExtension>, LogParserDefect> {
        let factory = self.extensions.get(name).ok_or_else(|| {
            LogParserDefect::sdk_definition(format!("no parser extension registered as '{name}'"))
        })?;
        let extension = factory().map_err(|e| {
            LogParserDefect::sdk_definition_caused_by(
                format!("parser extension '{name}' could not be instantiated"),
                Arc::from(e),
            )
        })?;
        if extension.name().is_empty() {
            return Err(LogParserDefect::sdk_definition(format!(
                "parser extension '{name}' reports an empty name"
            )));
        }
        if extension.name() != name {
            return Err(LogParserDefect::sdk_definition(format!(
                "parser extension registered as '{name}' reports name '{}'",
                extension.name()
            )));
        }
        Ok(extension)
    }

    /// Instantiate a parse definition, raising `ParseDefinitionImportExport`
    /// on failure.
    pub fn definition(&self, name: &str) -> ParseDefinition {
        self.try_definition(name)
            .unwrap_or_else(|defect| defect.raise())
    }

    pub fn try_definition(&self, name: &str) -> Result<ParseDefinition, LogParserDefect> {
        let factory = self.definitions.get(name).ok_or_else(|| {
            LogParserDefect::definition_import_export(format!(
                "no parse definition registered as '{name}'"
            ))
        })?;
        factory().map_err(|e| {
            LogParserDefect::definition_import_export_caused_by(
                format!("parse definition '{name}' could not be instantiated"),
                Arc::from(e),
            )
        })
    }

    /// Registered extension names, sorted.
    pub fn extension_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
