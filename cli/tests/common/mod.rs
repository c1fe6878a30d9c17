//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Create a small project tree under `src/<name>` and return its root.
    ///
    /// ```text
    /// <name>/
    ///   README.md        "readme"
    ///   empty.txt        ""
    ///   src/main.rs      "fn main() {}"
    ///   src/lib/mod.rs   "pub mod a;"
    ///   assets/          (empty directory)
    /// ```
    pub fn create_project(&self, name: &str) -> PathBuf {
        let root = self.src.path().join(name);
        fs::create_dir_all(root.join("src/lib")).expect("Failed to create directory");
        fs::create_dir_all(root.join("assets")).expect("Failed to create directory");
        fs::write(root.join("README.md"), "readme").expect("Failed to write file");
        fs::write(root.join("empty.txt"), "").expect("Failed to write file");
        fs::write(root.join("src/main.rs"), "fn main() {}").expect("Failed to write file");
        fs::write(root.join("src/lib/mod.rs"), "pub mod a;").expect("Failed to write file");
        root
    }

    /// Path under the destination directory.
    pub fn dst_path(&self, relative: &str) -> PathBuf {
        self.dst.path().join(relative)
    }

    /// Count all files in a directory recursively.
    pub fn count_files_recursive(&self, dir: &Path) -> usize {
        let mut count = 0;
        if dir.is_dir() {
            for entry in fs::read_dir(dir).expect("Failed to read directory") {
                let entry = entry.expect("Failed to read entry");
                let path = entry.path();
                if path.is_dir() {
                    count += self.count_files_recursive(&path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }

    /// Check that `path` is a zero-length regular file.
    pub fn assert_empty_file(&self, path: &Path) {
        let metadata = fs::metadata(path)
            .unwrap_or_else(|e| panic!("File does not exist: {:?}: {e}", path));
        assert!(metadata.is_file(), "Not a regular file: {:?}", path);
        assert_eq!(metadata.len(), 0, "File is not empty: {:?}", path);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
