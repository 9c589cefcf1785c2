//! Validator facade tests with a scripted external engine
//!
//! The engine seam is exercised the way an integration would use it: the
//! facade resolves the schema, the engine reports violations, and the
//! strict entry point turns a non-empty report into an error.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use xsd_validator::documents::Document;
use xsd_validator::registry::Registry;
use xsd_validator::{Error, Result, ValidationEngine, Validator};

/// Engine recording the schema paths it was asked to compile and replaying
/// a scripted violation list
struct ScriptedEngine {
    violations: Vec<String>,
    compiled: Rc<RefCell<Vec<PathBuf>>>,
}

impl ScriptedEngine {
    fn new(violations: &[&str]) -> Self {
        Self {
            violations: violations.iter().map(|s| s.to_string()).collect(),
            compiled: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn compiled_paths(&self) -> Rc<RefCell<Vec<PathBuf>>> {
        Rc::clone(&self.compiled)
    }
}

impl ValidationEngine for ScriptedEngine {
    type Schema = PathBuf;

    fn compile(&self, path: &Path) -> Result<Self::Schema> {
        self.compiled.borrow_mut().push(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    fn validate(&self, _schema: &Self::Schema, _document: &Document) -> Result<Vec<String>> {
        Ok(self.violations.clone())
    }
}

fn fixture_registry() -> Registry {
    Registry::from_entries(
        "/schemas",
        [
            ("urn:oasis:names:specification:ubl:schema:xsd:Invoice-2", "ubl2.1/maindoc/UBL-Invoice-2.1.xsd"),
            ("urn:oasis:names:specification:ubl:schema:xsd:Invoice-2_ubl2.0", "ubl2.0/maindoc/UBL-Invoice-2.0.xsd"),
        ],
    )
}

const UBL_DOC: &str = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
    xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
    <cbc:UBLVersionID>2.0</cbc:UBLVersionID>
</Invoice>"#;

#[test]
fn facade_compiles_the_resolved_schema() {
    let engine = ScriptedEngine::new(&[]);
    let compiled = engine.compiled_paths();
    let validator = Validator::new(fixture_registry(), engine);

    let violations = validator.validate_str(UBL_DOC).unwrap();
    assert!(violations.is_empty());

    // The engine saw exactly the path the resolver picked
    assert_eq!(
        *compiled.borrow(),
        vec![PathBuf::from("/schemas/ubl2.0/maindoc/UBL-Invoice-2.0.xsd")]
    );
}

#[test]
fn violations_come_back_in_engine_order() {
    let validator = Validator::new(
        fixture_registry(),
        ScriptedEngine::new(&[
            "Element 'Invoice': Missing child element(s). Expected is cbc:ID.",
            "Element 'cbc:IssueDate': 'not-a-date' is not a valid value.",
        ]),
    );

    let violations = validator.validate_str(UBL_DOC).unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations[0].contains("Missing child element"));
    assert!(violations[1].contains("IssueDate"));
}

#[test]
fn strict_error_message_joins_every_violation_with_newlines() {
    let validator = Validator::new(
        fixture_registry(),
        ScriptedEngine::new(&["first violation", "second violation", "third violation"]),
    );

    let err = validator.validate_strict_str(UBL_DOC).unwrap_err();
    let message = err.to_string();

    assert_eq!(
        message,
        "validation error: first violation\nsecond violation\nthird violation"
    );
}

#[test]
fn strict_returns_ok_for_valid_document() {
    let validator = Validator::new(fixture_registry(), ScriptedEngine::new(&[]));
    let doc = Document::from_string(UBL_DOC).unwrap();

    assert!(validator.validate_strict(&doc).is_ok());
}

#[test]
fn non_strict_never_errors_on_violations() {
    let validator = Validator::new(
        fixture_registry(),
        ScriptedEngine::new(&["some violation"]),
    );

    // Returned as data, not raised
    let violations = validator.validate_str(UBL_DOC).unwrap();
    assert_eq!(violations, vec!["some violation".to_string()]);
}

#[test]
fn unroutable_document_fails_before_reaching_the_engine() {
    let engine = ScriptedEngine::new(&["should never be reported"]);
    let validator = Validator::new(fixture_registry(), engine);

    let err = validator
        .validate_str(r#"<Doc xmlns="urn:not:registered"/>"#)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownNamespace { .. }));
}
