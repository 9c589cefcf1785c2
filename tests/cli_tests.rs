//! CLI integration tests
//!
//! Run the built binary against a generated schema tree. These only exist
//! when the binary does: `cargo test --features cli`.

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_xsd-validator");

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "schemas/ubl2.1/maindoc/UBL-Invoice-2.1.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            targetNamespace="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
            version="2.1"/>"#,
    );
    write_file(
        dir.path(),
        "invoice.xml",
        r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"/>"#,
    );
    dir
}

#[test]
fn test_cli_registry_lists_entries() {
    let dir = fixture_tree();

    let output = Command::new(BIN)
        .args(["registry", dir.path().join("schemas").to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "registry should succeed");
    assert!(
        stdout.contains("urn_oasis_names_specification_ubl_schema_xsd_Invoice-2"),
        "should print the normalized bare key"
    );
    assert!(
        stdout.contains("_ubl2.1"),
        "should print the version-suffixed key"
    );
}

#[test]
fn test_cli_resolve_prints_schema_path() {
    let dir = fixture_tree();

    let output = Command::new(BIN)
        .args([
            "resolve",
            dir.path().join("invoice.xml").to_str().unwrap(),
            "--schemas",
            dir.path().join("schemas").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "resolve should succeed");
    assert!(
        stdout.contains("ubl2.1/maindoc/UBL-Invoice-2.1.xsd"),
        "should print the resolved maindoc path"
    );
}

#[test]
fn test_cli_resolve_from_saved_registry() {
    let dir = fixture_tree();
    let table = dir.path().join("registry.json");

    let output = Command::new(BIN)
        .args([
            "registry",
            dir.path().join("schemas").to_str().unwrap(),
            "--output",
            table.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "registry --output should succeed");

    let output = Command::new(BIN)
        .args([
            "resolve",
            dir.path().join("invoice.xml").to_str().unwrap(),
            "--registry",
            table.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "resolve should succeed");
    assert!(stdout.contains("UBL-Invoice-2.1.xsd"));
}

#[test]
fn test_cli_resolve_unknown_namespace_fails() {
    let dir = fixture_tree();
    write_file(dir.path(), "unknown.xml", r#"<Doc xmlns="urn:nobody:knows"/>"#);

    let output = Command::new(BIN)
        .args([
            "resolve",
            dir.path().join("unknown.xml").to_str().unwrap(),
            "--schemas",
            dir.path().join("schemas").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "resolve should fail");
    assert!(stderr.contains("urn:nobody:knows"), "should name the namespace");
}
