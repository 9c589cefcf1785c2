//! XML document handling
//!
//! Parses XML into an owned element tree with namespaces resolved at parse
//! time, and provides the namespace-scoped descendant query the extractor
//! and registry builder run against documents (`//First/Next/...`).

use crate::error::{Error, Result};
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name with resolved namespace
    pub name: QName,
    /// Element attributes, keyed by local name
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespaces declared on this element, in declaration order
    pub namespaces: NamespaceContext,
}

impl Element {
    fn new(name: QName, attributes: IndexMap<String, String>, namespaces: NamespaceContext) -> Self {
        Self {
            name,
            attributes,
            text: None,
            children: Vec::new(),
            namespaces,
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    /// Get the namespace URI of the element
    pub fn namespace(&self) -> Option<&str> {
        self.name.namespace.as_deref()
    }

    /// Get an attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

/// XML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    root: Option<Element>,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<Element> = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e, &stack)?;
                    stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(current),
                            None => root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e, &stack)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("failed to unescape text: {}", e)))?
                            .to_string();
                        if !text.trim().is_empty() {
                            current.text = Some(text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Comments, processing instructions, declarations
            }
            buf.clear();
        }

        Ok(Document { root })
    }

    /// Parse an element from a start event, resolving its namespace against
    /// its own declarations and the open-element scope
    fn parse_element(start: &BytesStart, scope: &[Element]) -> Result<Element> {
        let raw_name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("invalid element name: {}", e)))?
            .to_string();

        let mut namespaces = NamespaceContext::new();
        let mut attributes = IndexMap::new();

        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            if attr_name == "xmlns" {
                namespaces.declare("", attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.declare(prefix, attr_value);
            } else {
                // Regular attribute, keyed by local name
                let local = attr_name.split_once(':').map_or(attr_name, |(_, l)| l);
                attributes.insert(local.to_string(), attr_value);
            }
        }

        let (prefix, local) = match raw_name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", raw_name.as_str()),
        };

        // An empty URI (xmlns="") un-declares the default namespace
        let namespace =
            Self::resolve_prefix(prefix, &namespaces, scope).filter(|ns| !ns.is_empty());
        let name = match namespace {
            Some(ns) => QName::namespaced(ns, local),
            None if !prefix.is_empty() => {
                return Err(Error::Xml(format!("undeclared namespace prefix: {}", prefix)))
            }
            None => QName::local(local),
        };

        Ok(Element::new(name, attributes, namespaces))
    }

    /// Look a prefix up on the element itself, then outwards through the
    /// enclosing elements
    fn resolve_prefix(prefix: &str, own: &NamespaceContext, scope: &[Element]) -> Option<String> {
        if let Some(ns) = own.get(prefix) {
            return Some(ns.to_string());
        }
        for ancestor in scope.iter().rev() {
            if let Some(ns) = ancestor.namespaces.get(prefix) {
                return Some(ns.to_string());
            }
        }
        None
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Text of the first element matching `//path[0]/path[1]/...` with every
    /// step in `namespace`
    ///
    /// The first step matches any descendant (or the root itself); the
    /// remaining steps walk children. Returns None when no element matches
    /// or the match has no text.
    pub fn find_text(&self, namespace: &str, path: &[&str]) -> Option<&str> {
        let root = self.root.as_ref()?;
        let (first, rest) = path.split_first()?;
        find_descendant(root, namespace, first, rest).and_then(|el| el.text.as_deref())
    }
}

fn find_descendant<'a>(
    element: &'a Element,
    namespace: &str,
    first: &str,
    rest: &[&str],
) -> Option<&'a Element> {
    if element.name.matches(namespace, first) {
        if let Some(found) = walk_path(element, namespace, rest) {
            return Some(found);
        }
    }
    for child in &element.children {
        if let Some(found) = find_descendant(child, namespace, first, rest) {
            return Some(found);
        }
    }
    None
}

fn walk_path<'a>(element: &'a Element, namespace: &str, path: &[&str]) -> Option<&'a Element> {
    let (next, tail) = match path.split_first() {
        Some(split) => split,
        None => return Some(element),
    };
    for child in &element.children {
        if child.name.matches(namespace, next) {
            if let Some(found) = walk_path(child, namespace, tail) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "child");
        assert_eq!(root.children[0].text.as_deref(), Some("text"));
    }

    #[test]
    fn test_root_namespace_resolution() {
        let xml = r#"<inv:Invoice xmlns:inv="urn:example:invoice"/>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.local_name(), "Invoice");
        assert_eq!(root.namespace(), Some("urn:example:invoice"));
    }

    #[test]
    fn test_default_namespace_inherited() {
        let xml = r#"<Invoice xmlns="urn:example:invoice"><ID>42</ID></Invoice>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.namespace(), Some("urn:example:invoice"));
        assert_eq!(root.children[0].namespace(), Some("urn:example:invoice"));
    }

    #[test]
    fn test_prefix_resolved_through_ancestors() {
        let xml = r#"<a:outer xmlns:a="urn:a"><a:inner>x</a:inner></a:outer>"#;
        let doc = Document::from_string(xml).unwrap();

        let inner = &doc.root().unwrap().children[0];
        assert_eq!(inner.namespace(), Some("urn:a"));
    }

    #[test]
    fn test_undeclared_default_namespace() {
        let xml = r#"<outer xmlns="urn:a"><inner xmlns="">x</inner></outer>"#;
        let doc = Document::from_string(xml).unwrap();

        let inner = &doc.root().unwrap().children[0];
        assert_eq!(inner.namespace(), None);
    }

    #[test]
    fn test_undeclared_prefix_is_an_error() {
        let xml = r#"<a:outer>x</a:outer>"#;
        assert!(matches!(Document::from_string(xml), Err(Error::Xml(_))));
    }

    #[test]
    fn test_attributes_keyed_by_local_name() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
            targetNamespace="urn:example" version="2.1"/>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.get_attribute("targetNamespace"), Some("urn:example"));
        assert_eq!(root.get_attribute("version"), Some("2.1"));
        assert_eq!(root.get_attribute("missing"), None);
    }

    #[test]
    fn test_namespace_declarations_not_attributes() {
        let xml = r#"<root xmlns="urn:a" xmlns:b="urn:b" id="1"/>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.attributes.len(), 1);
        assert_eq!(root.namespaces.len(), 2);
        assert_eq!(root.namespaces.default_namespace(), Some("urn:a"));
        assert_eq!(root.namespaces.get("b"), Some("urn:b"));
    }

    #[test]
    fn test_find_text_descendant_path() {
        let xml = r#"<env xmlns:sii="urn:sii">
            <body>
                <sii:Cabecera><sii:IDVersionSii>1.1</sii:IDVersionSii></sii:Cabecera>
            </body>
        </env>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(
            doc.find_text("urn:sii", &["Cabecera", "IDVersionSii"]),
            Some("1.1")
        );
    }

    #[test]
    fn test_find_text_is_namespace_scoped() {
        let xml = r#"<env xmlns:other="urn:other">
            <other:Cabecera><other:IDVersionSii>1.1</other:IDVersionSii></other:Cabecera>
        </env>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.find_text("urn:sii", &["Cabecera", "IDVersionSii"]), None);
    }

    #[test]
    fn test_find_text_no_match() {
        let xml = r#"<root xmlns="urn:a"><child/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        assert_eq!(doc.find_text("urn:a", &["missing"]), None);
    }

    #[test]
    fn test_empty_document_has_no_root() {
        let doc = Document::from_string("").unwrap();
        assert!(doc.root().is_none());
    }
}
