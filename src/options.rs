//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior and
//! [`ContentStrategy`] for choosing how destination files are produced.
//!
//! # Example
//!
//! ```
//! use treecopy::{ContentStrategy, CopyOptions};
//!
//! // Replicate the tree with empty placeholder files
//! let options = CopyOptions::default()
//!     .with_strategy(ContentStrategy::Shadow)
//!     .with_dir_mode(0o700);
//! ```

/// How each regular file is materialized at its destination.
///
/// Both strategies share the same tree walk and path resolution; only the
/// per-file step differs.
///
/// # Default
///
/// The default is [`ContentStrategy::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentStrategy {
    /// Copy every byte, then flush the destination to durable storage.
    #[default]
    Full,
    /// Create a zero-length destination file without reading the source.
    ///
    /// The source must still exist and be openable.
    Shadow,
}

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `strategy` | `Full` | Copy file contents |
/// | `fsync` | `true` | Sync each file to disk after writing |
/// | `dir_mode` | `0o755` | Mode for created directories (Unix, before umask) |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// How destination files are produced
    pub strategy: ContentStrategy,

    /// Whether to sync files to disk after writing (default: true)
    ///
    /// Only meaningful for [`ContentStrategy::Full`]; shadow files have no
    /// content to flush.
    pub fsync: bool,

    /// Permission bits for created directories (default: `0o755`)
    ///
    /// The process umask still applies. Ignored on non-Unix platforms.
    pub dir_mode: u32,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-entry progress messages (optional)
    ///
    /// Receives one line for every directory created, file materialized and
    /// entry skipped. Falls back to `tracing::debug!` like `warn_handler`.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            strategy: ContentStrategy::Full,
            fsync: true,
            dir_mode: 0o755,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl CopyOptions {
    /// Options for a shadow copy: same tree, zero-length files.
    #[must_use]
    pub fn shadow() -> Self {
        Self::default().with_strategy(ContentStrategy::Shadow)
    }

    /// Set the content strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: ContentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Set the permission bits used when creating directories
    #[must_use]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a verbose handler
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("{}", msg);
        }
    }
}
