//! Core copy operations.
//!
//! This module provides the tree walk that copies or shadow-copies a file
//! or directory, the per-file materializer it dispatches to, and the
//! dry-run planner built on the same resolution.

mod dir;
mod file;
mod utils;

// Re-export public API
pub use dir::{CopyStats, PlanItem, copy, copy_tree, plan_tree, shadow_copy};
