//! Parent-before-children traversal of a source tree.

use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Classification of a visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryKind {
    /// A directory
    Directory,
    /// A regular file
    File,
    /// Anything else (symlink, FIFO, socket, device); never copied
    Other,
}

impl EntryKind {
    /// Lower-case name used in plan output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Other => "other",
        }
    }
}

/// One entry produced by [`walk`].
#[derive(Debug, Clone)]
pub(crate) struct VisitedEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Walk `root` depth-first, yielding every directory before its children.
///
/// Siblings are visited in file-name order so that a walk over the same
/// tree always produces the same sequence. Symlinks are reported as
/// [`EntryKind::Other`] and never followed below the root.
pub(crate) fn walk(root: &Path) -> impl Iterator<Item = Result<VisitedEntry>> + use<> {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(move |entry| match entry {
            Ok(entry) => {
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                Ok(VisitedEntry {
                    path: entry.into_path(),
                    kind,
                })
            }
            Err(e) => Err(Error::Walk {
                path: e.path().map_or_else(|| root.clone(), Path::to_path_buf),
                source: io::Error::from(e),
            }),
        })
}
