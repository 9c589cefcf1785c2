//! Schema registry
//!
//! The lookup table behind the resolver: normalized namespace key to
//! relative schema path under a schemas root. Built once, ahead of the
//! validation hot path, by scanning every `.xsd` resource and deriving its
//! key from the schema's own declared target namespace. Read-only after
//! construction.
//!
//! The reference deployment materialized this mapping as filesystem
//! symlinks; here it is an in-memory map with optional JSON persistence
//! over the identical key space.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::loaders::{Loader, Location};
use crate::resolver::UBL_DOCUMENT;
use crate::XSD_NAMESPACE;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// UBL revision registered under the bare namespace as the implicit default
const UBL_LATEST_VERSION: &str = "2.1";

static NON_KEY_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-.#]+").unwrap());

/// Normalize a namespace string into a registry key
///
/// Every run of characters outside `[A-Za-z0-9_\-.#]` collapses to a single
/// underscore.
pub fn normalize_key(key: &str) -> String {
    NON_KEY_CHARS.replace_all(key, "_").into_owned()
}

/// Mapping from normalized namespace key to schema resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    root: PathBuf,
    entries: IndexMap<String, PathBuf>,
}

impl Registry {
    /// Build the registry by scanning every `.xsd` under `schemas_root`
    ///
    /// The scan is recursive and sorted, so two builds over the same tree
    /// produce the same mapping. Resources that cannot be parsed or yield
    /// no key are skipped with a diagnostic; colliding keys follow
    /// last-write-wins and are logged.
    pub fn build(schemas_root: impl AsRef<Path>) -> Result<Self> {
        let root = schemas_root.as_ref().to_path_buf();
        let loader = Loader::new();

        let mut files = Vec::new();
        collect_xsd_files(&root, &mut files)?;
        files.sort();

        let mut entries: IndexMap<String, PathBuf> = IndexMap::new();
        for path in files {
            let relative = match path.strip_prefix(&root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => path.clone(),
            };

            let content = loader.load_schema(&Location::from(path.as_path()))?;
            let doc = match Document::parse(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(resource = %relative.display(), error = %e, "skipping unparseable schema");
                    continue;
                }
            };
            let Some(schema_root) = doc.root() else {
                warn!(resource = %relative.display(), "skipping schema with no root element");
                continue;
            };

            if let Some(target_ns) = schema_root.get_attribute("targetNamespace") {
                let mut key = target_ns.to_string();
                if UBL_DOCUMENT.is_match(target_ns) {
                    if let Some(version) = schema_root.get_attribute("version") {
                        if version == UBL_LATEST_VERSION {
                            // Extra entry without the _ubl suffix: the latest
                            // revision doubles as the family default
                            insert_entry(&mut entries, normalize_key(target_ns), relative.clone());
                        }
                        // UBL 2.0 and 2.1 share one targetNamespace
                        key = format!("{}_ubl{}", target_ns, version);
                    }
                }
                insert_entry(&mut entries, normalize_key(&key), relative);
            } else {
                // No targetNamespace: key by the schema's own declared
                // namespace. When the default xmlns is the XML Schema
                // meta-namespace, the schema's namespace is the second
                // declaration on the root.
                let declared: Vec<&str> =
                    schema_root.namespaces.declarations().map(|(_, ns)| ns).collect();
                let key = match schema_root.namespaces.default_namespace() {
                    Some(XSD_NAMESPACE) => declared.get(1).copied(),
                    Some(ns) => Some(ns),
                    None => None,
                };
                match key {
                    Some(k) => insert_entry(&mut entries, normalize_key(k), relative),
                    None => {
                        debug!(resource = %relative.display(), "schema has no derivable namespace key; skipped")
                    }
                }
            }
        }

        debug!(entries = entries.len(), root = %root.display(), "registry built");
        Ok(Self { root, entries })
    }

    /// Construct a registry from explicit entries (fixture registries,
    /// precomputed tables)
    ///
    /// Keys are normalized on the way in.
    pub fn from_entries<K, V>(
        schemas_root: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<PathBuf>,
    {
        Self {
            root: schemas_root.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize_key(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// The schemas root this registry's paths are relative to
    pub fn schemas_root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a schema resource given its relative path
    pub fn schema_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Look up a namespace key (normalized first) and return the full path
    ///
    /// Fails with [`UnknownNamespace`](Error::UnknownNamespace) carrying the
    /// key as requested, before normalization.
    pub fn resolve_key(&self, key: &str) -> Result<PathBuf> {
        match self.entries.get(&normalize_key(key)) {
            Some(relative) => Ok(self.root.join(relative)),
            None => Err(Error::UnknownNamespace {
                namespace: key.to_string(),
            }),
        }
    }

    /// Whether a key (normalized first) has an entry
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Iterate over `(key, relative path)` entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the registry as a JSON table
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a registry persisted with [`save`](Registry::save)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn insert_entry(entries: &mut IndexMap<String, PathBuf>, key: String, resource: PathBuf) {
    if let Some(previous) = entries.get(&key) {
        if *previous != resource {
            warn!(
                key = %key,
                previous = %previous.display(),
                replacement = %resource.display(),
                "registry key collision; last write wins"
            );
        }
    }
    entries.insert(key, resource);
}

fn collect_xsd_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::Resource(format!("failed to read '{}': {}", dir.display(), e)))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_xsd_files(&path, found)?;
        } else if path.extension().map(|ext| ext == "xsd").unwrap_or(false) {
            found.push(path);
        }
    }
    Ok(())
}
