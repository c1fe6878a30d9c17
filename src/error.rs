//! Error types for treecopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy, compare and planning operations, the
//! [`Result`] type alias, and the machine-readable [`ErrorCode`].
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Not found | [`Error::SourceNotFound`] |
//! | Type conflict | [`Error::TypeConflict`] |
//! | IO | [`Error::Io`], [`Error::CreateDir`], [`Error::Materialize`], [`Error::Read`], [`Error::Walk`] |
//! | Resolution | [`Error::OutsideSourceRoot`], [`Error::NoFileName`], [`Error::DestinationInsideSource`], [`Error::SameFile`] |
//!
//! A copy that fails partway leaves everything produced before the failure
//! on disk. There is no error variant for that: the first error is returned
//! as-is and the partial destination is accepted behavior.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for treecopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use treecopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw errno can be present even when kind() was not mapped
        if let Some(raw_error) = error.raw_os_error() {
            return raw_error == libc::ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
///
/// The string forms returned by [`ErrorCode::as_str`] are part of the
/// command-line tool's output contract and do not change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The source path does not exist
    SourceNotFound,
    /// A directory would overwrite a non-directory
    TypeConflict,
    /// The destination device is full
    NoSpace,
    /// The OS refused access
    PermissionDenied,
    /// Any other IO failure
    IoError,
    /// The arguments cannot describe a valid copy
    InvalidInput,
    /// A bug or an unexpected internal state
    Internal,
}

impl ErrorCode {
    /// The snake_case name of this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::TypeConflict => "type_conflict",
            Self::NoSpace => "no_space",
            Self::PermissionDenied => "permission_denied",
            Self::IoError => "io_error",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        if error.kind() == io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied;
        }
        Self::IoError
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during treecopy operations.
///
/// All errors include relevant path information to aid debugging.
/// Use the [`std::error::Error`] trait methods to access underlying
/// causes where applicable.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error not tied to a more specific step
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source path does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// A directory source cannot replace an existing non-directory
    #[error("Cannot overwrite non-directory '{}' with directory '{}'", .dst.display(), .src.display())]
    TypeConflict {
        /// The source directory
        src: PathBuf,
        /// The existing non-directory destination
        dst: PathBuf,
    },

    /// The resolved destination lies inside the source tree
    #[error("Cannot copy directory '{}' into itself at '{}'", .src.display(), .dst.display())]
    DestinationInsideSource {
        /// The source directory
        src: PathBuf,
        /// The destination that would be created inside it
        dst: PathBuf,
    },

    /// A file source resolves to itself
    #[error("Source and destination are the same file: {0}")]
    SameFile(PathBuf),

    /// The source root has no final component to nest under the destination
    #[error("Source has no file name: {0}")]
    NoFileName(PathBuf),

    /// A visited entry did not live under the source root
    #[error("Path {} is not under source root {}", .path.display(), .root.display())]
    OutsideSourceRoot {
        /// The visited entry
        path: PathBuf,
        /// The source root of the walk
        root: PathBuf,
    },

    /// Failed to create a destination directory
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to produce a destination file
    #[error("Failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    Materialize {
        /// Source file
        src: PathBuf,
        /// Destination file
        dst: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to read a file being compared
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to traverse the source tree
    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        /// Entry at which traversal failed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// Machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::TypeConflict { .. } => ErrorCode::TypeConflict,
            Self::DestinationInsideSource { .. } | Self::SameFile(_) | Self::NoFileName(_) => {
                ErrorCode::InvalidInput
            }
            Self::OutsideSourceRoot { .. } => ErrorCode::Internal,
            Self::Io(source)
            | Self::CreateDir { source, .. }
            | Self::Materialize { source, .. }
            | Self::Read { source, .. }
            | Self::Walk { source, .. } => ErrorCode::from_io(source),
        }
    }

    /// The underlying IO error, if this error wraps one.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io(source)
            | Self::CreateDir { source, .. }
            | Self::Materialize { source, .. }
            | Self::Read { source, .. }
            | Self::Walk { source, .. } => Some(source),
            _ => None,
        }
    }
}
