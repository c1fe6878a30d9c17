//! # treecopy
//!
//! Recursive file/directory copying, zero-length "shadow" copies, and
//! whole-file comparison for Rust.
//!
//! ## Core Features
//!
//! - **Recursive copy**: copies a file or a directory tree, parent directories before children
//! - **Shadow copy**: reproduces directory structure and file names with empty files
//! - **`cp`-like destination rules**: a directory copied into an existing directory is nested under its own name
//! - **Type-conflict safe**: never replaces an existing file with a directory
//! - **Durable**: each copied file is flushed with `fsync` and closed with error checking
//! - **Dry run**: [`plan_tree`] resolves every destination without writing
//! - **Compare**: [`compare_file`] orders two files by their bytes
//!
//! ## Quick Start
//!
//! ```no_run
//! use treecopy::{copy, shadow_copy};
//!
//! // `backup` exists: the tree lands at backup/project/...
//! let stats = copy("project", "backup")?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//!
//! // `index` does not exist: it becomes the copy of `media`
//! shadow_copy("media", "index")?;
//! # Ok::<(), treecopy::Error>(())
//! ```
//!
//! ## Where Entries Land
//!
//! | Source | Destination | Result |
//! |--------|-------------|--------|
//! | file | missing or file | written at the destination |
//! | file | directory | `destination/<file name>` |
//! | directory | missing | destination becomes the copy |
//! | directory | directory | `destination/<directory name>/...` |
//! | directory | file | [`Error::TypeConflict`] |
//!
//! ## Failure Model
//!
//! The first failure stops the copy and is returned. Entries produced
//! before it stay on disk; there is no rollback.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] and [`PlanItem`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod compare;
mod copy;
mod error;
mod options;
mod resolve;
mod utils;
mod walk;

pub use builder::CopyBuilder;
pub use compare::{compare_file, file_emptiness, is_file_empty};
pub use copy::{CopyStats, PlanItem, copy, copy_tree, plan_tree, shadow_copy};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{ContentStrategy, CopyOptions};
pub use resolve::{DestinationState, PathResolver};
pub use walk::EntryKind;
