//! Basic functionality integration tests for the treecp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_basic_file_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(src.path().join("test.txt"))
        .arg(dst.path().join("renamed.txt"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("renamed.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_file_into_existing_directory() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello world").unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(src.path().join("test.txt"))
        .arg(dst.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dst.path().join("test.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_file_overwrites_existing_file() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("short.txt"), "new").unwrap();
    fs::write(dst.path().join("target.txt"), "much longer old content").unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(src.path().join("short.txt"))
        .arg(dst.path().join("target.txt"))
        .assert()
        .success();

    // Truncated, not merged with the old bytes
    assert_eq!(
        fs::read_to_string(dst.path().join("target.txt")).unwrap(),
        "new"
    );
}

#[test]
fn test_directory_to_missing_destination() {
    let fixture = TestFixture::new();
    let project = fixture.create_project("project");
    let target = fixture.dst_path("copied");

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(&project)
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 4 files, 4 dirs"));

    // The destination itself becomes the copy, no extra level
    assert!(!target.join("project").exists());
    fixture.assert_file_content(&target.join("README.md"), "readme");
    fixture.assert_file_content(&target.join("src/main.rs"), "fn main() {}");
    fixture.assert_file_content(&target.join("src/lib/mod.rs"), "pub mod a;");
    fixture.assert_empty_file(&target.join("empty.txt"));
    assert!(target.join("assets").is_dir());
    assert_eq!(fixture.count_files_recursive(&target), 4);
}

#[test]
fn test_directory_into_existing_directory_nests() {
    let fixture = TestFixture::new();
    let project = fixture.create_project("project");

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(&project)
        .arg(fixture.dst.path())
        .assert()
        .success();

    let nested = fixture.dst_path("project");
    fixture.assert_file_content(&nested.join("README.md"), "readme");
    fixture.assert_file_content(&nested.join("src/lib/mod.rs"), "pub mod a;");
    assert!(nested.join("assets").is_dir());
    assert!(!fixture.dst_path("README.md").exists());
}

#[test]
fn test_trailing_slashes_do_not_change_placement() {
    let fixture = TestFixture::new();
    let project = fixture.create_project("project");

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(format!("{}/", project.display()))
        .arg(format!("{}/", fixture.dst.path().display()))
        .assert()
        .success();

    fixture.assert_file_content(&fixture.dst_path("project/README.md"), "readme");
    fixture.assert_file_content(&fixture.dst_path("project/src/main.rs"), "fn main() {}");
}

#[test]
fn test_copy_twice_into_same_directory_fails_on_existing_root() {
    let fixture = TestFixture::new();
    let project = fixture.create_project("project");

    cargo_bin_cmd!("treecp")
        .arg("copy")
        .arg(&project)
        .arg(fixture.dst.path())
        .assert()
        .success();

    // dst/project already exists, so creating it again is an error
    cargo_bin_cmd!("treecp")
        .arg("copy")
        .arg(&project)
        .arg(fixture.dst.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[io_error]"))
        .stderr(predicate::str::contains("Failed to create directory"));
}

#[test]
fn test_empty_directory_copy() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::create_dir(src.path().join("empty")).unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg(src.path().join("empty"))
        .arg(dst.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 dirs"));

    assert!(dst.path().join("out").is_dir());
    assert_eq!(fs::read_dir(dst.path().join("out")).unwrap().count(), 0);
}

#[test]
fn test_binary_content_preserved() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let content: Vec<u8> = (0..=255u8).cycle().take(256 * 1024 + 17).collect();
    fs::write(src.path().join("blob.bin"), &content).unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg("--no-sync")
        .arg(src.path().join("blob.bin"))
        .arg(dst.path().join("blob.bin"))
        .assert()
        .success();

    assert_eq!(fs::read(dst.path().join("blob.bin")).unwrap(), content);
}

#[test]
fn test_quiet_mode() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(src.path().join("test.txt"), "hello").unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg("-q")
        .arg(src.path().join("test.txt"))
        .arg(dst.path().join("test.txt"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_verbose_reports_each_entry() {
    let fixture = TestFixture::new();
    let project = fixture.create_project("project");
    let target = fixture.dst_path("copied");

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg("-v")
        .arg(&project)
        .arg(&target)
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "created directory {}",
            target.join("assets").display()
        )))
        .stderr(predicate::str::contains("copied "))
        .stderr(predicate::str::contains(format!(
            "{} (12 bytes)",
            target.join("src/main.rs").display()
        )));
}

#[cfg(unix)]
#[test]
fn test_dir_mode_applied() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TestFixture::new();
    let project = fixture.create_project("project");
    let target = fixture.dst_path("copied");

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg("--dir-mode")
        .arg("700")
        .arg(&project)
        .arg(&target)
        .assert()
        .success();

    let mode = fs::metadata(target.join("src")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o700);
}

#[test]
fn test_invalid_dir_mode_rejected() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("copy")
        .arg("--dir-mode")
        .arg("999")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid octal mode"));

    assert!(!dst.path().join("out").exists());
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("treecp");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("shadow"))
        .stdout(predicate::str::contains("cmp"))
        .stdout(predicate::str::contains("empty"));
}
