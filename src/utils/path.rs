//! Path utilities for root normalization and containment checks.
//!
//! All path arithmetic in this crate works on components, never on string
//! lengths, so separators trailing a root are irrelevant to resolution.
//! Normalizing only keeps displayed and returned paths tidy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Rebuild `path` from its components.
///
/// Drops trailing and repeated separators and interior `.` components
/// (`a//b/./c/` becomes `a/b/c`). `..` components are kept because they
/// cannot be resolved lexically when symlinks are involved.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Give a directory root a final component.
///
/// Roots such as `.` or `dir/..` have no file name to nest under an
/// existing destination, so they are canonicalized. Roots that already
/// have one are returned unchanged to keep the caller's spelling in
/// resolved paths.
pub(crate) fn nameable_root(path: &Path) -> io::Result<PathBuf> {
    if path.file_name().is_some() {
        return Ok(path.to_path_buf());
    }
    fs::canonicalize(path)
}

/// Check whether `candidate` is `root` or lies below it.
///
/// `root` must exist. `candidate` may not exist yet: its nearest existing
/// ancestor is canonicalized and the missing tail appended, so symlinked
/// prefixes (such as a temp dir behind `/tmp`) compare correctly.
pub(crate) fn is_within(candidate: &Path, root: &Path) -> io::Result<bool> {
    let root = fs::canonicalize(root)?;
    let candidate = canonicalize_existing_prefix(candidate)?;
    Ok(candidate.starts_with(root))
}

/// Check whether `a` and `b` name the same existing file.
///
/// Returns `false` when either path is missing. On Unix the device and
/// inode are compared, so hard links count as the same file.
pub(crate) fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let (a_meta, b_meta) = match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a_meta), Ok(b_meta)) => (a_meta, b_meta),
        (Err(e), _) | (_, Err(e))
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            return Ok(false);
        }
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(a_meta.dev() == b_meta.dev() && a_meta.ino() == b_meta.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (a_meta, b_meta);
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut tail = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(mut resolved) => {
                resolved.extend(tail.iter().rev());
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Ok(absolute.clone());
                };
                tail.push(name);
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}
