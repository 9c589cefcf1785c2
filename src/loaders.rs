//! Resource loading
//!
//! Loads XML documents and schema resources from the local filesystem, with
//! size limits applied. Canonical namespace URIs are remote URLs, but schema
//! resources always ship with the application: remote locations are
//! classified and rejected, never fetched.

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Resource location - a local path or a (rejected) remote URL
#[derive(Debug, Clone)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// Remote URL (http, https, ftp, ...)
    Url(Url),
}

impl Location {
    /// Classify a location string
    pub fn classify(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() != "file" {
                return Location::Url(url);
            }
        }
        Location::Path(PathBuf::from(s))
    }

    /// Whether this is a remote location
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.to_path_buf())
    }
}

/// Resource loader for documents and schema resources
#[derive(Debug, Default)]
pub struct Loader {
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load an XML document as bytes
    pub fn load_document(&self, location: &Location) -> Result<Vec<u8>> {
        let content = self.read(location)?;
        self.limits.check_xml_size(content.len())?;
        Ok(content)
    }

    /// Load a schema resource as bytes
    pub fn load_schema(&self, location: &Location) -> Result<Vec<u8>> {
        let content = self.read(location)?;
        self.limits.check_schema_size(content.len())?;
        Ok(content)
    }

    fn read(&self, location: &Location) -> Result<Vec<u8>> {
        match location {
            Location::Path(path) => fs::read(path).map_err(|e| {
                Error::Resource(format!("failed to read '{}': {}", path.display(), e))
            }),
            Location::Url(url) => Err(Error::Resource(format!(
                "remote resources are not supported: {}",
                url
            ))),
        }
    }
}
