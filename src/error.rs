//! Error types for xsd-validator
//!
//! Every failure is surfaced to the caller eagerly; there is no retry or
//! recovery anywhere in the crate. Non-strict validation returns schema
//! violations as data — only malformed or unroutable input becomes an error.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsd-validator Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schema resolution and validation routing
#[derive(Error, Debug)]
pub enum Error {
    /// Input has no root element
    #[error("invalid document: no root element")]
    InvalidDocument,

    /// Root element carries no namespace declaration
    #[error("document root has no namespace")]
    MissingNamespace,

    /// No registry entry for the resolved key (with or without version suffix)
    #[error("unknown namespace {namespace}")]
    UnknownNamespace {
        /// The offending namespace key, as looked up
        namespace: String,
    },

    /// Strict validation failed: the engine reported one or more violations
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry persistence error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failure raised by the strict entry point
///
/// Carries the external engine's violation messages in reported order. The
/// display form is the newline-joined list.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Violation messages, in the order the engine reported them
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Create a validation error from the engine's violation list
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violations.join("\n"))
    }
}

impl std::error::Error for ValidationError {}
