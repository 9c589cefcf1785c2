//! # xsd-validator
//!
//! Schema resolution and XSD validation routing for electronic invoicing and
//! tax-reporting documents.
//!
//! Incoming documents from the Spanish SII families (AEAT, Gipuzkoa,
//! Bizkaia), UBL and CII/Factur-X all have to be validated against the right
//! schema revision, and the root namespace alone is not enough to pick it:
//! the document's own version and customization markers have to be
//! inspected. This crate implements that routing — it does not implement
//! XML Schema validation itself, which is delegated to an external engine
//! behind the [`validator::ValidationEngine`] trait.
//!
//! ## Components
//!
//! - [`extract`] — pulls the root namespace URI and the family-specific
//!   version/customization token out of a parsed document.
//! - [`resolver`] — maps `(namespace, version)` to a schema path through an
//!   enumerated family dispatch table.
//! - [`registry`] — the lookup table behind the resolver, built ahead of
//!   time by scanning a tree of `.xsd` resources.
//! - [`validator`] — the facade composing the above with an external
//!   validation engine.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsd_validator::{Document, Registry, Validator};
//!
//! let registry = Registry::build("path/to/schemas")?;
//! let validator = Validator::new(registry, engine);
//!
//! let doc = Document::from_string(&xml)?;
//! let violations = validator.validate(&doc)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod namespaces;

pub mod documents;
pub mod loaders;

pub mod extract;
pub mod registry;
pub mod resolver;
pub mod validator;

// Re-exports for convenience
pub use documents::Document;
pub use error::{Error, Result};
pub use extract::Extracted;
pub use registry::Registry;
pub use validator::{ValidationEngine, Validator};

/// Version of the xsd-validator library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema meta-namespace (the ambient `xmlns` on schema documents)
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
