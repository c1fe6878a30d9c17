//! Tree copy orchestration.
//!
//! This module walks a source tree parent-before-children, resolves each
//! entry's destination with [`PathResolver`], and creates directories or
//! materializes files as it goes. The same walk backs [`plan_tree`], which
//! resolves without touching the filesystem.

use crate::error::{Error, Result};
use crate::options::{ContentStrategy, CopyOptions};
use crate::resolve::{DestinationState, PathResolver};
use crate::utils::path::{is_within, nameable_root, normalize, same_file};
use crate::walk::{EntryKind, walk};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::file::materialize;

/// Statistics from a copy operation.
///
/// Returned by [`copy_tree`] to report what was produced before it returned.
///
/// # Example
///
/// ```no_run
/// use treecopy::{copy_tree, CopyOptions};
/// use std::path::Path;
///
/// let stats = copy_tree(Path::new("src"), Path::new("dst"), &CopyOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of regular files materialized (full or shadow)
    pub files_copied: u64,
    /// Number of directories created
    pub dirs_created: u64,
    /// Total bytes written (0 for a shadow copy)
    pub bytes_copied: u64,
    /// Entries that are neither regular files nor directories
    pub entries_skipped: u64,
    /// Duration of the copy operation
    pub duration: Duration,
}

/// One entry of a dry run, as returned by [`plan_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanItem {
    /// The visited source entry
    pub source: PathBuf,
    /// Where it would land; `None` for entries that are skipped
    pub destination: Option<PathBuf>,
    /// What the entry is
    pub kind: EntryKind,
}

/// Copy `src` to `dst`, materializing full file contents.
///
/// `src` may be a file or a directory. See [`PathResolver`] for where
/// entries land depending on what exists at `dst`.
///
/// # Errors
///
/// See [`copy_tree`].
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<CopyStats> {
    copy_tree(src.as_ref(), dst.as_ref(), &CopyOptions::default())
}

/// Replicate the structure of `src` at `dst` with zero-length files.
///
/// Directories and file names are reproduced exactly as [`copy`] would;
/// every file is created empty and no source content is read.
///
/// # Errors
///
/// See [`copy_tree`].
pub fn shadow_copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<CopyStats> {
    copy_tree(src.as_ref(), dst.as_ref(), &CopyOptions::shadow())
}

/// Copy a file or directory tree
///
/// # Strategy
///
/// 1. Probe the source once and the destination once
/// 2. Reject a directory source over an existing non-directory
/// 3. Walk the source depth-first, parent before children
/// 4. For each directory: resolve, create, re-probe, and feed the fresh
///    classification into later resolutions
/// 5. For each regular file: resolve and materialize per `options.strategy`
///
/// The first failure aborts the walk. Everything produced before it stays
/// on disk.
///
/// # Arguments
///
/// * `src` - Source file or directory
/// * `dst` - Destination path
/// * `options` - Copy options
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is a directory and destination an existing non-directory ([`Error::TypeConflict`])
/// - The directory would be copied into itself ([`Error::DestinationInsideSource`])
/// - A file would be copied onto itself ([`Error::SameFile`])
/// - Traversal fails ([`Error::Walk`])
/// - A directory cannot be created, including when it already exists ([`Error::CreateDir`])
/// - A file cannot be produced ([`Error::Materialize`])
/// - Probing a path fails for a reason other than absence ([`Error::Io`])
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();
    let prepared = prepare(src, dst)?;
    let resolver = &prepared.resolver;

    if prepared.root_kind == EntryKind::Other {
        options.warn(&format!(
            "{} is neither a regular file nor a directory, nothing to copy",
            resolver.source_root().display()
        ));
    }

    let mut stats = CopyStats::default();
    let mut current = resolver.initial();

    for entry in walk(resolver.source_root()) {
        let entry = entry?;

        match entry.kind {
            EntryKind::Directory => {
                let target = resolver.resolve(current, &entry.path)?;
                current = create_dir(&target, options)?;
                stats.dirs_created += 1;
                options.verbose(&format!("created directory {}", target.display()));
            }
            EntryKind::File => {
                let target = resolver.resolve(current, &entry.path)?;
                let bytes = materialize(&entry.path, &target, options)?;
                stats.files_copied += 1;
                stats.bytes_copied += bytes;
                match options.strategy {
                    ContentStrategy::Full => options.verbose(&format!(
                        "copied {} -> {} ({} bytes)",
                        entry.path.display(),
                        target.display(),
                        bytes
                    )),
                    ContentStrategy::Shadow => options.verbose(&format!(
                        "shadowed {} -> {}",
                        entry.path.display(),
                        target.display()
                    )),
                }
            }
            EntryKind::Other => {
                stats.entries_skipped += 1;
                options.verbose(&format!(
                    "skipped {} (not a regular file or directory)",
                    entry.path.display()
                ));
            }
        }
    }

    stats.duration = start_time.elapsed();
    Ok(stats)
}

/// Resolve every entry of a copy from `src` to `dst` without writing.
///
/// Performs the same probes and validation as [`copy_tree`], then walks the
/// source. After a directory is planned the destination is treated as an
/// existing directory, exactly as the real walk would see it after
/// creating one.
///
/// Each resolved target is probed, so the plan fails where the copy would:
/// on a directory target that already exists, or a file target occupied by
/// a directory.
///
/// # Errors
///
/// The validation and traversal errors of [`copy_tree`], plus
/// [`Error::CreateDir`] or [`Error::Materialize`] for the occupied targets
/// above.
pub fn plan_tree(src: &Path, dst: &Path) -> Result<Vec<PlanItem>> {
    let prepared = prepare(src, dst)?;
    let resolver = &prepared.resolver;

    let mut items = Vec::new();
    let mut current = resolver.initial();

    for entry in walk(resolver.source_root()) {
        let entry = entry?;

        let destination = match entry.kind {
            EntryKind::Directory => {
                let target = resolver.resolve(current, &entry.path)?;
                if DestinationState::probe(&target)?.exists() {
                    return Err(Error::CreateDir {
                        path: target,
                        source: io::Error::from(io::ErrorKind::AlreadyExists),
                    });
                }
                current = DestinationState::DIRECTORY;
                Some(target)
            }
            EntryKind::File => {
                let target = resolver.resolve(current, &entry.path)?;
                if DestinationState::probe(&target)?.is_dir() {
                    return Err(Error::Materialize {
                        src: entry.path,
                        dst: target,
                        source: io::Error::from(io::ErrorKind::IsADirectory),
                    });
                }
                Some(target)
            }
            EntryKind::Other => None,
        };

        items.push(PlanItem {
            source: entry.path,
            destination,
            kind: entry.kind,
        });
    }

    Ok(items)
}

/// Validated inputs of one copy invocation
struct Prepared {
    resolver: PathResolver,
    root_kind: EntryKind,
}

fn prepare(src: &Path, dst: &Path) -> Result<Prepared> {
    let src = normalize(src);
    let dst = normalize(dst);

    let src_meta = match fs::metadata(&src) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound(src));
        }
        Err(e) => return Err(e.into()),
    };
    let source_is_dir = src_meta.is_dir();
    let root_kind = if source_is_dir {
        EntryKind::Directory
    } else if src_meta.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    let initial = DestinationState::probe(&dst)?;
    if source_is_dir && initial.exists() && !initial.is_dir() {
        return Err(Error::TypeConflict { src, dst });
    }

    let src = if source_is_dir {
        nameable_root(&src)?
    } else {
        src
    };
    let resolver = PathResolver::new(src, dst, source_is_dir, initial)?;

    let root_target = resolver.root_target();
    if source_is_dir {
        if is_within(&root_target, resolver.source_root())? {
            return Err(Error::DestinationInsideSource {
                src: resolver.source_root().to_path_buf(),
                dst: root_target,
            });
        }
    } else if same_file(resolver.source_root(), &root_target)? {
        // Creating the destination would truncate the source before it is read
        return Err(Error::SameFile(root_target));
    }

    Ok(Prepared {
        resolver,
        root_kind,
    })
}

/// Create one directory and return the classification of what now exists
/// there.
fn create_dir(path: &Path, options: &CopyOptions) -> Result<DestinationState> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(options.dir_mode);
    }
    #[cfg(not(unix))]
    let _ = options;

    builder.create(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;

    DestinationState::probe(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Tests
// =============================================================================
