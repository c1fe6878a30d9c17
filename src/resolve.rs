//! Destination path resolution.
//!
//! [`PathResolver`] decides where every entry visited under the source root
//! lands in the destination tree. It is a pure function of its inputs: the
//! two roots, whether the source root is a directory, the destination
//! classification taken before the walk, and the *current* destination
//! classification, which the walker threads through as a
//! [`DestinationState`] accumulator and replaces after every directory it
//! creates.
//!
//! | Source | Destination before walk | Root entry lands at | `src/a/b` lands at |
//! |--------|-------------------------|---------------------|--------------------|
//! | file | missing or file | `dst` | - |
//! | file | directory | `dst/<name>` | - |
//! | directory | missing | `dst` | `dst/a/b` |
//! | directory | directory | `dst/<name>` | `dst/<name>/a/b` |
//! | directory | file | rejected before the walk | - |

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Exists / is-directory classification of a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestinationState {
    exists: bool,
    is_dir: bool,
}

impl DestinationState {
    /// Nothing exists at the path.
    pub const MISSING: Self = Self {
        exists: false,
        is_dir: false,
    };

    /// Something other than a directory exists at the path.
    pub const NON_DIRECTORY: Self = Self {
        exists: true,
        is_dir: false,
    };

    /// A directory exists at the path.
    pub const DIRECTORY: Self = Self {
        exists: true,
        is_dir: true,
    };

    /// Classify `path` by following symlinks.
    ///
    /// A path that is missing, or whose parent is not a directory, is
    /// [`DestinationState::MISSING`]. Any other stat failure is returned.
    pub fn probe(path: &Path) -> io::Result<Self> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Self::DIRECTORY),
            Ok(_) => Ok(Self::NON_DIRECTORY),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(Self::MISSING)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether anything exists at the path.
    #[must_use]
    pub fn exists(self) -> bool {
        self.exists
    }

    /// Whether a directory exists at the path.
    #[must_use]
    pub fn is_dir(self) -> bool {
        self.is_dir
    }
}

/// Maps entries under a source root to their destination paths.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use treecopy::{DestinationState, PathResolver};
///
/// // Copy folder `photos` into the existing folder `backup`
/// let resolver = PathResolver::new("photos", "backup", true, DestinationState::DIRECTORY)?;
/// let dst = resolver.resolve(DestinationState::DIRECTORY, Path::new("photos/2024/a.jpg"))?;
/// assert_eq!(dst, Path::new("backup/photos/2024/a.jpg"));
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathResolver {
    source_root: PathBuf,
    destination_root: PathBuf,
    source_is_dir: bool,
    initial: DestinationState,
    /// Set only when a directory is copied into a directory that already
    /// existed before the walk.
    nest_name: Option<OsString>,
}

impl PathResolver {
    /// Create a resolver for one copy invocation.
    ///
    /// `initial` is the destination classification taken before the walk;
    /// it stays fixed for the resolver's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFileName`] when a directory must be nested inside
    /// an existing destination but `source_root` has no final component
    /// (for example `/`). Callers holding paths such as `.` or `..` should
    /// canonicalize them first.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        source_root: P,
        destination_root: Q,
        source_is_dir: bool,
        initial: DestinationState,
    ) -> Result<Self> {
        let source_root = source_root.into();
        let nest_name = if source_is_dir && initial.is_dir() {
            let name = source_root
                .file_name()
                .ok_or_else(|| Error::NoFileName(source_root.clone()))?;
            Some(name.to_os_string())
        } else {
            None
        };

        Ok(Self {
            source_root,
            destination_root: destination_root.into(),
            source_is_dir,
            initial,
            nest_name,
        })
    }

    /// The source root entries are resolved against.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The destination root.
    #[must_use]
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Destination classification recorded before the walk.
    #[must_use]
    pub fn initial(&self) -> DestinationState {
        self.initial
    }

    /// Where the source tree's root lands: the top-most path the walk will
    /// create or write.
    #[must_use]
    pub fn root_target(&self) -> PathBuf {
        if !self.initial.is_dir() {
            return self.destination_root.clone();
        }
        match &self.nest_name {
            Some(name) => self.destination_root.join(name),
            // Single file into a directory
            None => match self.source_root.file_name() {
                Some(name) => self.destination_root.join(name),
                None => self.destination_root.clone(),
            },
        }
    }

    /// Resolve the destination path of `visited`.
    ///
    /// `current` is the latest known classification of the destination
    /// root: the pre-walk snapshot until the walker creates a directory,
    /// then the state of that freshly created directory.
    ///
    /// While `current` is not a directory every entry resolves to the
    /// destination root itself; the walker only reaches that branch for
    /// the source root's own entry.
    ///
    /// # Errors
    ///
    /// - [`Error::OutsideSourceRoot`] if `visited` is not under the source root
    /// - [`Error::NoFileName`] if a file source has no final component
    pub fn resolve(&self, current: DestinationState, visited: &Path) -> Result<PathBuf> {
        if !current.is_dir() {
            return Ok(self.destination_root.clone());
        }

        if !self.source_is_dir {
            let name = visited
                .file_name()
                .ok_or_else(|| Error::NoFileName(visited.to_path_buf()))?;
            return Ok(self.destination_root.join(name));
        }

        let relative =
            visited
                .strip_prefix(&self.source_root)
                .map_err(|_| Error::OutsideSourceRoot {
                    path: visited.to_path_buf(),
                    root: self.source_root.clone(),
                })?;

        let mut resolved = self.destination_root.clone();
        if let Some(name) = &self.nest_name {
            resolved.push(name);
        }
        // Joining an empty path would append a trailing separator
        if !relative.as_os_str().is_empty() {
            resolved.push(relative);
        }
        Ok(resolved)
    }
}
