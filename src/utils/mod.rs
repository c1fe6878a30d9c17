//! Internal helpers shared by the copy and planning code.

pub(crate) mod path;
