//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations), which decides which
//! pictures need work, and the [`backend`](super::backend), which does the
//! pixel work. Tests swap in a recording backend without touching the
//! operation logic.

use std::path::PathBuf;

/// Parameters for a resize to exact dimensions.
///
/// `source` and `output` may be the same path: the backend decodes fully
/// before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}
