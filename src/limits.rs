//! Limits for XML and schema resource reads
//!
//! Guards the crate's own file reads (registry scan, CLI input) against
//! oversized inputs. The external validation engine applies its own limits.

use crate::error::{Error, Result};

/// Resource read limits
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum XML document size in bytes
    pub max_xml_size: usize,

    /// Maximum schema resource size in bytes
    pub max_schema_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_size: 100 * 1024 * 1024,   // 100 MB
            max_schema_size: 20 * 1024 * 1024, // 20 MB
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_size: 10 * 1024 * 1024,   // 10 MB
            max_schema_size: 2 * 1024 * 1024, // 2 MB
        }
    }

    /// Check if an XML document size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a schema resource size is within limits
    pub fn check_schema_size(&self, size: usize) -> Result<()> {
        if size > self.max_schema_size {
            Err(Error::LimitExceeded(format!(
                "schema size {} bytes exceeds maximum {} bytes",
                size, self.max_schema_size
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert!(limits.check_xml_size(1024).is_ok());
        assert!(limits.check_xml_size(200 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_xml_size < Limits::default().max_xml_size);
        assert!(limits.check_schema_size(3 * 1024 * 1024).is_err());
    }
}
