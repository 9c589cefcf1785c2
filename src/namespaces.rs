//! XML namespace handling
//!
//! Qualified names and per-element namespace declaration contexts. The
//! declaration order is preserved: the registry builder keys schemas without
//! a `targetNamespace` by the position of their namespace declarations.

use indexmap::IndexMap;

/// Qualified name - combination of namespace URI and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Whether this name matches the given namespace URI and local name
    pub fn matches(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace declarations on a single element, in declaration order
///
/// The default namespace is stored under the empty prefix.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    decls: IndexMap<String, String>,
}

impl NamespaceContext {
    /// Create an empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a namespace declaration (`""` prefix for the default namespace)
    pub fn declare(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.decls.insert(prefix.into(), namespace.into());
    }

    /// Get the namespace URI for a prefix (`""` for the default namespace)
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.decls.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn default_namespace(&self) -> Option<&str> {
        self.get("")
    }

    /// Declarations in the order they appeared on the element
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Number of declarations on this element
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether this element declares any namespaces
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
