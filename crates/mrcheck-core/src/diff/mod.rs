//! Object set comparison and diagnostics.
//!
//! - [`engine`]: priority-ordered diff (mismatch, missing, extra)
//! - [`model`]: diff output types
//! - [`semantic`]: representation-insensitive equality
//! - [`report`]: human-readable diagnostics

pub mod engine;
pub mod model;
pub mod report;
pub mod semantic;

pub use engine::{compute_diff, find_extra, find_mismatches, find_missing};
pub use model::{DiffOptions, DiffResult, DiffStage, ObjectMismatch};
pub use report::render;
