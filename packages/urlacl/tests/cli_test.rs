//! Tests for the `urlacl-compile` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn urlacl_compile() -> Command {
    Command::cargo_bin("urlacl-compile").unwrap()
}

#[test]
fn test_compile_prints_yaml() {
    urlacl_compile()
        .arg("compile")
        .arg(fixture("service_reservations.wxs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("url_reservations:"))
        .stdout(predicate::str::contains("id: ApiReservation"))
        .stdout(predicate::str::contains("Wix4SchedHttpUrlReservationsInstall_X86"));
}

#[test]
fn test_compile_json_for_arm64_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("records.json");

    urlacl_compile()
        .arg("compile")
        .arg(fixture("service_reservations.wxs"))
        .args(["--platform", "arm64", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 reservation(s), 2 ACE(s)"));

    let written = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        value["references"][0]["name"],
        "Wix4SchedHttpUrlReservationsInstall_ARM64"
    );
    assert_eq!(value["url_aces"][0]["security_principal"], "NT SERVICE\\WebSvc");
}

#[test]
fn test_compile_reports_errors_and_fails() {
    urlacl_compile()
        .arg("compile")
        .arg(fixture("invalid_reservations.wxs"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HandleExisting attribute's value, 'bogus'"))
        .stderr(predicate::str::contains("doesn't identify the security"))
        .stderr(predicate::str::contains("Compilation failed with 5 error(s)"));
}

#[test]
fn test_compile_missing_file() {
    urlacl_compile()
        .arg("compile")
        .arg("does-not-exist.wxs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_compile_unknown_platform() {
    urlacl_compile()
        .arg("compile")
        .arg(fixture("service_reservations.wxs"))
        .args(["--platform", "mips"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform"));
}
