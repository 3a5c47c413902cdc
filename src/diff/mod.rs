//! Diff acquisition and validation.

pub mod source;
pub mod validate;

pub use source::{CaptureMode, DiffSource, ManualDiff, Workspace, WorkspaceDiff};
pub use validate::{DiffValidator, MarkerValidator, ValidatedDiff, validate_diff};
