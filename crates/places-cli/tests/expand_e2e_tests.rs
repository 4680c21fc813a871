//! End-to-end tests for places expand command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn places(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("places").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("PLACES_HOUSE_NUMBER_COLUMN");
    cmd
}

#[test]
fn test_expand_ranges() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("in.csv"),
        "postal_code,house_numbers\n6369CW,2 t/m 4\n6369CW,3\n1011AB,7a\n",
    )
    .unwrap();

    places(&dir)
        .args(["expand", "in.csv", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows written:       4"))
        .stdout(predicate::str::contains("Duplicates removed: 1"));

    assert_eq!(
        fs::read_to_string(dir.path().join("out.csv")).unwrap(),
        "postal_code,house_numbers\n6369CW,2\n6369CW,3\n6369CW,4\n1011AB,7a\n"
    );
}

#[test]
fn test_expand_in_place_with_custom_column() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.csv"), "zip,nr\nA,1 t/m 2\n").unwrap();

    places(&dir)
        .args(["expand", "in.csv", "in.csv", "--column", "nr"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("in.csv")).unwrap(),
        "zip,nr\nA,1\nA,2\n"
    );
}

#[test]
fn test_expand_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.csv"), "zip,nr\nA,1 t/m 2\n").unwrap();

    places(&dir)
        .args(["expand", "in.csv", "out.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing column 'house_numbers'"));

    assert!(!dir.path().join("out.csv").exists());
}
