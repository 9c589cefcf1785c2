//! Schema resolution
//!
//! Maps a document's `(namespace, version token)` pair to the physical
//! schema resource that applies to it. The dispatch is a closed table of
//! namespace families, evaluated in precedence order: the three regional
//! SII variants, then UBL, then CII, then the generic registry fallback.
//!
//! SII revisions and CII/Factur-X profiles route to fixed relative paths
//! under the schemas root; UBL and generic lookups go through the
//! [`Registry`](crate::registry::Registry).

use crate::error::Result;
use crate::registry::Registry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

/// General SII (AEAT) "LR" document namespace
pub const SII_LR: &str = "https://www2.agenciatributaria.gob.es/static_files/common/internet/dep/aplicaciones/es/aeat/ssii/fact/ws/SuministroLR.xsd";
/// General SII header namespace, used only to scope the version query
pub const SII_INFORMACION: &str = "https://www2.agenciatributaria.gob.es/static_files/common/internet/dep/aplicaciones/es/aeat/ssii/fact/ws/SuministroInformacion.xsd";
/// Gipuzkoa SII "LR" document namespace
pub const GIPUZKOA_SII_LR: &str = "https://egoitza.gipuzkoa.eus/ogasuna/sii/ficheros/SuministroLR.xsd";
/// Gipuzkoa SII header namespace, used only to scope the version query
pub const GIPUZKOA_SII_INFORMACION: &str =
    "https://egoitza.gipuzkoa.eus/ogasuna/sii/ficheros/SuministroInformacion.xsd";
/// Bizkaia SII "LR" document namespace
pub const BIZKAIA_SII_LR: &str = "http://www.bizkaia.eus/ogasuna/sii/documentos/SuministroLR.xsd";
/// Bizkaia SII header namespace, used only to scope the version query
pub const BIZKAIA_SII_INFORMACION: &str =
    "http://www.bizkaia.eus/ogasuna/sii/documentos/SuministroInformacion.xsd";

/// UBL common basic components namespace, scope for `UBLVersionID` and
/// `CustomizationID` queries
pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
/// CII reusable aggregate namespace, scope for the customization-id query
pub const RAM: &str =
    "urn:un:unece:uncefact:data:standard:ReusableAggregateBusinessInformationEntity:100";

/// Pattern matching UBL document and schema namespaces
pub static UBL_DOCUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"urn:oasis:names:specification:ubl:schema:xsd:").unwrap());
/// Pattern matching CII document namespaces
pub static CII_DOCUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"urn:un:unece:uncefact:data:standard:CrossIndustryInvoice").unwrap());

/// CustomizationID marking the eSPap public-sector UBL profile, which shares
/// the plain UBL namespace
pub const ESPAP_CUSTOMIZATION: &str = "UBL-2.1-eSPap";
const ESPAP_SCHEMA: &str = "espap/maindoc/UBL-eSPap-Invoice-2.1.xsd";

// SII revision tables: version token -> relative schema path. The fallback
// row applies to absent or unrecognized tokens; for the general family that
// is the oldest revision, not the newest.
const SII_GENERAL_REVISIONS: &[(&str, &str)] = &[
    ("1.1", "sii_v11/SuministroLR.xsd"),
    ("1.0", "sii_v10/SuministroLR.xsd"),
    ("0.7", "sii_v07/SuministroLR.xsd"),
];
const SII_GENERAL_FALLBACK: &str = "sii_v06/SuministroLR.xsd";

const SII_GIPUZKOA_REVISIONS: &[(&str, &str)] = &[("1.0", "sii_gipuzkoa/SuministroLR.xsd")];
const SII_GIPUZKOA_FALLBACK: &str = "sii_gipuzkoa/v11/SuministroLR.xsd";

const SII_BIZKAIA_REVISIONS: &[(&str, &str)] = &[("1.0", "sii_bizkaia/SuministroLR.xsd")];
const SII_BIZKAIA_FALLBACK: &str = "sii_bizkaia/v11/SuministroLR.xsd";

/// CII customization id -> Factur-X profile schema
const CII_PROFILES: &[(&str, &str)] = &[
    ("urn:factur-x.eu:1p0:minimum", "factur-x/minimum/FACTUR-X_MINIMUM.xsd"),
    ("urn:cen.eu:en16931:2017", "factur-x/en16931/FACTUR-X_EN16931.xsd"),
    (
        "urn:cen.eu:en16931:2017#compliant#urn:factur-x.eu:1p0:basic",
        "factur-x/basic/FACTUR-X_BASIC.xsd",
    ),
    ("urn:factur-x.eu:1p0:basicwl", "factur-x/basic_wl/FACTUR-X_BASIC-WL.xsd"),
    (
        "urn:cen.eu:en16931:2017#conformant#urn:factur-x.eu:1p0:extended",
        "factur-x/extended/FACTUR-X_EXTENDED.xsd",
    ),
];

/// Regional SII tax authority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// General AEAT endpoint
    General,
    /// Gipuzkoa provincial authority
    Gipuzkoa,
    /// Bizkaia provincial authority
    Bizkaia,
}

impl Region {
    /// Namespace scoping this region's header version query
    pub fn version_scope(self) -> &'static str {
        match self {
            Region::General => SII_INFORMACION,
            Region::Gipuzkoa => GIPUZKOA_SII_INFORMACION,
            Region::Bizkaia => BIZKAIA_SII_INFORMACION,
        }
    }

    /// Relative schema path for a header version token
    pub fn revision(self, version: Option<&str>) -> &'static str {
        let (revisions, fallback) = match self {
            Region::General => (SII_GENERAL_REVISIONS, SII_GENERAL_FALLBACK),
            Region::Gipuzkoa => (SII_GIPUZKOA_REVISIONS, SII_GIPUZKOA_FALLBACK),
            Region::Bizkaia => (SII_BIZKAIA_REVISIONS, SII_BIZKAIA_FALLBACK),
        };
        version
            .and_then(|v| revisions.iter().find(|(token, _)| *token == v))
            .map(|(_, path)| *path)
            .unwrap_or(fallback)
    }
}

/// Namespace family, the closed dispatch set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Regional SII "LR" submission
    Sii(Region),
    /// UBL document
    Ubl,
    /// CII / Factur-X document
    Cii,
    /// Anything else: plain registry lookup
    Generic,
}

impl Family {
    /// Classify a root namespace, in precedence order
    pub fn of(namespace: &str) -> Family {
        match namespace {
            SII_LR => Family::Sii(Region::General),
            GIPUZKOA_SII_LR => Family::Sii(Region::Gipuzkoa),
            BIZKAIA_SII_LR => Family::Sii(Region::Bizkaia),
            ns if UBL_DOCUMENT.is_match(ns) => Family::Ubl,
            ns if CII_DOCUMENT.is_match(ns) => Family::Cii,
            _ => Family::Generic,
        }
    }
}

/// Resolve a `(namespace, version token)` pair to a schema path
///
/// An empty token is equivalent to an absent one. Fails with
/// [`UnknownNamespace`](crate::Error::UnknownNamespace) when a registry
/// lookup finds no entry; there is no best-effort schema.
pub fn resolve(registry: &Registry, namespace: &str, version: Option<&str>) -> Result<PathBuf> {
    let version = version.filter(|v| !v.is_empty());

    match Family::of(namespace) {
        Family::Sii(region) => {
            let revision = region.revision(version);
            debug!(namespace, version, revision, "resolved SII revision");
            Ok(registry.schema_path(revision))
        }
        Family::Ubl => {
            if version == Some(ESPAP_CUSTOMIZATION) {
                debug!(namespace, "resolved eSPap profile");
                return Ok(registry.schema_path(ESPAP_SCHEMA));
            }
            match version {
                Some(v) => registry.resolve_key(&format!("{}_ubl{}", namespace, v)),
                None => registry.resolve_key(namespace),
            }
        }
        Family::Cii => {
            if let Some(token) = version {
                if let Some((_, profile)) = CII_PROFILES.iter().find(|(id, _)| *id == token) {
                    debug!(namespace, token, profile, "resolved CII profile");
                    return Ok(registry.schema_path(profile));
                }
            }
            registry.resolve_key(namespace)
        }
        Family::Generic => match version {
            Some(v) => registry.resolve_key(&format!("{}_ubl{}", namespace, v)),
            None => registry.resolve_key(namespace),
        },
    }
}
