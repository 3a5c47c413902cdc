//! commit-suggest - turn a git diff into commit message and pull request suggestions.
//!
//! # Overview
//!
//! commit-suggest captures a diff (from the workspace via git, or pasted by the
//! user), checks that it looks like a unified diff, sends a bounded request to
//! a generation service, and renders the structured answer into a view model
//! shared by the `generate` and `form` surfaces.

pub mod apply;
pub mod config;
pub mod diff;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod render;
pub mod surface;

// Re-export commonly used types
pub use config::Endpoint;
pub use diff::{CaptureMode, DiffSource, DiffValidator, ManualDiff, MarkerValidator, Workspace, WorkspaceDiff};
pub use error::{CommitError, PipelineError};
pub use generate::{
    CommitStyle, GenerationClient, GenerationOptions, GenerationRequest, GenerationResponse,
    HttpGenerationClient,
};
pub use pipeline::{Orchestrator, Outcome, Presenter, Stage};
pub use render::{PrSection, ViewModel};
pub use surface::{CommandPresenter, FormInput, FormPresenter, OutputFormat};
