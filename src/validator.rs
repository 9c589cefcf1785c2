//! Validation facade
//!
//! Thin composition over the extractor and resolver: pick the schema for a
//! document, hand both to the external XML Schema engine, return its
//! violation list. The engine itself is a collaborator behind
//! [`ValidationEngine`]; this crate never implements the validation
//! algorithm.

use crate::documents::Document;
use crate::error::{Result, ValidationError};
use crate::extract;
use crate::registry::Registry;
use crate::resolver;
use std::path::{Path, PathBuf};
use tracing::debug;

/// External XML Schema validation engine
///
/// Implementations compile a schema from a local file path and validate a
/// parsed document against it, returning the violations as ordered
/// human-readable strings. An empty list means the document is valid.
pub trait ValidationEngine {
    /// Compiled schema handle
    type Schema;

    /// Compile the schema resource at `path`
    fn compile(&self, path: &Path) -> Result<Self::Schema>;

    /// Validate `document` against a compiled schema
    fn validate(&self, schema: &Self::Schema, document: &Document) -> Result<Vec<String>>;
}

/// Validator facade: registry-backed schema resolution plus an external
/// engine
#[derive(Debug)]
pub struct Validator<E> {
    registry: Registry,
    engine: E,
}

impl<E: ValidationEngine> Validator<E> {
    /// Create a validator over a built registry and an engine
    pub fn new(registry: Registry, engine: E) -> Self {
        Self { registry, engine }
    }

    /// The registry backing this validator
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve the schema path that applies to a document
    pub fn schema_for(&self, document: &Document) -> Result<PathBuf> {
        let extracted = extract::extract(document)?;
        resolver::resolve(
            &self.registry,
            &extracted.namespace,
            extracted.version.as_deref(),
        )
    }

    /// Validate a parsed document, returning the engine's violation list
    /// verbatim (empty = valid)
    pub fn validate(&self, document: &Document) -> Result<Vec<String>> {
        let schema_path = self.schema_for(document)?;
        debug!(schema = %schema_path.display(), "validating document");
        let schema = self.engine.compile(&schema_path)?;
        self.engine.validate(&schema, document)
    }

    /// Parse raw XML bytes and validate
    pub fn validate_bytes(&self, xml: &[u8]) -> Result<Vec<String>> {
        self.validate(&Document::parse(xml)?)
    }

    /// Parse an XML string and validate
    pub fn validate_str(&self, xml: &str) -> Result<Vec<String>> {
        self.validate_bytes(xml.as_bytes())
    }

    /// Strict validation: error with the newline-joined violation messages
    /// unless the document is valid
    pub fn validate_strict(&self, document: &Document) -> Result<()> {
        let violations = self.validate(document)?;
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations).into())
        }
    }

    /// Strict validation of raw XML
    pub fn validate_strict_str(&self, xml: &str) -> Result<()> {
        let violations = self.validate_str(xml)?;
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations).into())
        }
    }
}
