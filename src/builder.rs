//! Builder API for ergonomic copy operations.
//!
//! The builder pattern provides a fluent interface for configuring and executing
//! copy operations. This is often more convenient than manually constructing
//! [`CopyOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst").run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## Shadow Copy
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! // Same names and directories, every file empty
//! let stats = CopyBuilder::new("media", "media-index")
//!     .shadow()
//!     .run()?;
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## Dry Run
//!
//! ```no_run
//! use treecopy::CopyBuilder;
//!
//! for item in CopyBuilder::new("src", "dst").plan()? {
//!     println!("{} -> {:?}", item.source.display(), item.destination);
//! }
//! # Ok::<(), treecopy::Error>(())
//! ```

use crate::copy::{CopyStats, PlanItem, copy_tree, plan_tree};
use crate::error::Result;
use crate::options::{ContentStrategy, CopyOptions};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing copy operations.
///
/// Works for both file and directory sources; where entries land is
/// decided by [`PathResolver`](crate::PathResolver).
///
/// # Example
///
/// ```no_run
/// use treecopy::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/project", "/backup")
///     .no_fsync()
///     .verbose(|msg| eprintln!("{msg}"))
///     .run()?;
/// # Ok::<(), treecopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (full content, fsync, directories created `0o755`).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
        }
    }

    /// Produce zero-length files instead of copying content.
    #[must_use]
    pub fn shadow(mut self) -> Self {
        self.options = self.options.with_strategy(ContentStrategy::Shadow);
        self
    }

    /// Set the content strategy explicitly.
    #[must_use]
    pub fn strategy(mut self, strategy: ContentStrategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Disable fsync after writing files.
    ///
    /// Faster, but a crash shortly after the copy may lose data that was
    /// reported as copied.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Set the permission bits for created directories (Unix only).
    #[must_use]
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.options = self.options.with_dir_mode(mode);
        self
    }

    /// Set a warning handler for non-fatal issues.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Receive one message per directory created, file produced and entry
    /// skipped.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy operation.
    ///
    /// # Errors
    ///
    /// See [`copy_tree`].
    pub fn run(self) -> Result<CopyStats> {
        copy_tree(&self.src, &self.dst, &self.options)
    }

    /// Resolve every entry without writing anything.
    ///
    /// # Errors
    ///
    /// See [`plan_tree`].
    pub fn plan(&self) -> Result<Vec<PlanItem>> {
        plan_tree(&self.src, &self.dst)
    }
}
