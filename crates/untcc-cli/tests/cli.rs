//! End-to-end tests for the `untcc` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn untcc() -> Command {
    Command::cargo_bin("untcc").unwrap()
}

#[test]
fn help_lists_both_entry_points() {
    untcc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("classify"));
}

#[test]
fn process_fails_when_no_documents_found() {
    let dir = tempfile::tempdir().unwrap();

    untcc()
        .arg("process")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no PDF documents found"));
}

#[test]
fn classify_fails_when_no_documents_found() {
    let dir = tempfile::tempdir().unwrap();

    untcc()
        .arg("classify")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no PDF documents found"));
}

#[test]
fn bad_filename_is_skipped_not_fatal() {
    // A document that exists but does not match the required filename
    // pattern contributes zero records; the batch itself succeeds.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("contributions_2020.pdf"), b"%PDF-1.4").unwrap();
    let output = dir.path().join("out.csv");

    untcc()
        .arg("process")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Year,Month,Mission,Country,Personnel_Type,Male,Female,Total"));
    assert_eq!(csv.lines().count(), 1, "header only, no records");
}

#[test]
fn extraction_failure_does_not_abort_the_batch() {
    // A well-named but unconvertible document is tallied as an error; the
    // run still exits zero and writes the (empty) output file.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("UN_country_contributions_2020_01.pdf"),
        b"not a real pdf",
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    untcc()
        .arg("process")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--tool")
        .arg("converter-that-does-not-exist")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));

    assert!(output.exists());
}

#[test]
fn config_path_is_reported() {
    untcc()
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file:"));
}
