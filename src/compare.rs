//! Whole-file comparison and the zero-length predicate.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

/// Compare the contents of two files byte by byte.
///
/// Both files are read fully into memory, so memory use is proportional to
/// the larger file. The ordering is lexicographic over bytes: a file that
/// is a proper prefix of the other sorts first.
///
/// # Example
///
/// ```no_run
/// use std::cmp::Ordering;
/// use treecopy::compare_file;
///
/// if compare_file("original.bin", "copy.bin")? == Ordering::Equal {
///     println!("identical");
/// }
/// # Ok::<(), treecopy::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::Read`] naming the first file that cannot be fully read.
pub fn compare_file<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> Result<Ordering> {
    let a = read_all(a.as_ref())?;
    let b = read_all(b.as_ref())?;
    Ok(a.as_slice().cmp(b.as_slice()))
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Check whether `path` is a zero-length file.
///
/// Returns `false` both for non-empty files and when `path` cannot be
/// stat'ed (missing, inaccessible). Use [`file_emptiness`] to tell those
/// apart.
#[must_use]
pub fn is_file_empty<P: AsRef<Path>>(path: P) -> bool {
    file_emptiness(path).unwrap_or(false)
}

/// Check whether `path` has size zero, reporting stat failures.
///
/// # Errors
///
/// Returns the error from stat'ing `path`.
pub fn file_emptiness<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    Ok(fs::metadata(path)?.len() == 0)
}
