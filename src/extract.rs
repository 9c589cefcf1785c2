//! Namespace and version extraction
//!
//! Reads the dispatch inputs out of a parsed document: the root namespace
//! URI, plus the version or customization token for families that encode
//! one in the document body. A missing token is a valid state (family
//! default), never an error; a missing root element or root namespace is.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::resolver::{Family, CBC, ESPAP_CUSTOMIZATION, RAM};

/// Dispatch inputs extracted from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Root element namespace URI, the primary dispatch key
    pub namespace: String,
    /// Family-specific version or customization token, if the document
    /// carries one
    pub version: Option<String>,
}

/// Namespace URI of the document's root element
pub fn root_namespace(document: &Document) -> Result<&str> {
    let root = document.root().ok_or(Error::InvalidDocument)?;
    root.namespace().ok_or(Error::MissingNamespace)
}

/// Extract the dispatch inputs from a parsed document
pub fn extract(document: &Document) -> Result<Extracted> {
    let namespace = root_namespace(document)?.to_string();
    let version = version_token(document, &namespace);
    Ok(Extracted { namespace, version })
}

/// The version/customization token for the namespace's family
///
/// - SII: `//Cabecera/IDVersionSii` scoped to the region's header namespace
/// - UBL: `//CustomizationID` when it names the eSPap profile, otherwise
///   `//UBLVersionID` (both CBC-scoped)
/// - CII: `//GuidelineSpecifiedDocumentContextParameter/ID` (RAM-scoped)
/// - Generic: `//UBLVersionID` — some non-UBL documents carry it anyway
fn version_token(document: &Document, namespace: &str) -> Option<String> {
    let text = match Family::of(namespace) {
        Family::Sii(region) => {
            document.find_text(region.version_scope(), &["Cabecera", "IDVersionSii"])
        }
        Family::Ubl => {
            let customization = document.find_text(CBC, &["CustomizationID"]);
            if customization == Some(ESPAP_CUSTOMIZATION) {
                customization
            } else {
                document.find_text(CBC, &["UBLVersionID"])
            }
        }
        Family::Cii => {
            document.find_text(RAM, &["GuidelineSpecifiedDocumentContextParameter", "ID"])
        }
        Family::Generic => document.find_text(CBC, &["UBLVersionID"]),
    };
    text.filter(|t| !t.is_empty()).map(str::to_string)
}
