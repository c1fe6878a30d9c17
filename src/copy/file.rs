//! Single file materialization.
//!
//! One entry point, [`materialize`], produces a destination file from a
//! source file with either [`ContentStrategy`]. Both strategies open the
//! source and create (or truncate) the destination; only the full strategy
//! moves bytes and flushes them.

use crate::error::{Error, Result};
use crate::options::{ContentStrategy, CopyOptions};
use std::fs::File;
use std::io;
use std::path::Path;

use super::utils::{close_file, copy_file_contents};

/// Produce `dst` from `src` using `options.strategy`.
///
/// Returns the number of bytes written (always 0 for a shadow copy).
///
/// # Errors
///
/// Returns [`Error::Materialize`] naming both paths if the source cannot be
/// opened, the destination cannot be created, or streaming, syncing or
/// closing the destination fails. Handles are released on every path.
pub(crate) fn materialize(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let produced = match options.strategy {
        ContentStrategy::Full => copy_contents(src, dst, options.fsync),
        ContentStrategy::Shadow => create_placeholder(src, dst),
    };

    produced.map_err(|source| Error::Materialize {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}

fn copy_contents(src: &Path, dst: &Path, fsync: bool) -> io::Result<u64> {
    let src_file = File::open(src)?;
    let len = src_file.metadata()?.len();

    // Dropped (and closed) on every early return below
    let dst_file = File::create(dst)?;

    let bytes = copy_file_contents(&src_file, &dst_file, len)?;

    if fsync {
        dst_file.sync_all()?;
    }

    close_file(dst_file)?;
    Ok(bytes)
}

fn create_placeholder(src: &Path, dst: &Path) -> io::Result<u64> {
    // Opened only to require a readable source; its bytes are never read
    let _src_file = File::open(src)?;
    let dst_file = File::create(dst)?;
    close_file(dst_file)?;
    Ok(0)
}

// =============================================================================
// Tests
// =============================================================================
