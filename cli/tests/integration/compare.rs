//! `treecp cmp` and `treecp empty` integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cmp_identical_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a"), "same bytes").unwrap();
    fs::write(dir.path().join("b"), "same bytes").unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("cmp")
        .arg(dir.path().join("a"))
        .arg(dir.path().join("b"))
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cmp_reports_which_file_sorts_first() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, [0x10, 0x20]).unwrap();
    fs::write(&b, [0x10, 0x21]).unwrap();

    cargo_bin_cmd!("treecp")
        .arg("cmp")
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::ends_with(format!(
            "differ: {} sorts first\n",
            a.display()
        )));

    cargo_bin_cmd!("treecp")
        .arg("cmp")
        .arg(&b)
        .arg(&a)
        .assert()
        .code(1)
        .stdout(predicate::str::ends_with(format!(
            "differ: {} sorts first\n",
            a.display()
        )));
}

#[test]
fn test_cmp_prefix_is_smaller() {
    let dir = TempDir::new().unwrap();
    let short = dir.path().join("short");
    let long = dir.path().join("long");
    fs::write(&short, "abc").unwrap();
    fs::write(&long, "abcd").unwrap();

    cargo_bin_cmd!("treecp")
        .arg("cmp")
        .arg(&long)
        .arg(&short)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "{} sorts first",
            short.display()
        )));
}

#[test]
fn test_cmp_missing_file_exits_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a"), "x").unwrap();

    cargo_bin_cmd!("treecp")
        .arg("cmp")
        .arg(dir.path().join("a"))
        .arg(dir.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[io_error]"))
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_cmp_after_copy_is_equal() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("original.bin");
    let copied = dir.path().join("copied.bin");
    let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&original, &content).unwrap();

    cargo_bin_cmd!("treecp")
        .arg("copy")
        .arg(&original)
        .arg(&copied)
        .assert()
        .success();

    cargo_bin_cmd!("treecp")
        .arg("cmp")
        .arg(&original)
        .arg(&copied)
        .assert()
        .code(0);
}

#[test]
fn test_empty_on_zero_length_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty");
    fs::write(&path, "").unwrap();

    cargo_bin_cmd!("treecp")
        .arg("empty")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(": empty"));
}

#[test]
fn test_empty_on_non_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("full");
    fs::write(&path, "x").unwrap();

    cargo_bin_cmd!("treecp")
        .arg("empty")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(": not empty"));
}

#[test]
fn test_empty_on_missing_path_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("treecp")
        .arg("empty")
        .arg("-q")
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}
