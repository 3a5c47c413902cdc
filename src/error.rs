//! Error types for commit-suggest modules using thiserror.

use thiserror::Error;

/// Failures of a single suggestion pipeline invocation.
///
/// Every variant is local to one invocation and maps to exactly one
/// user-visible message through its `Display` impl.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No workspace folder open.")]
    NoWorkspace,

    #[error("No changes detected (the diff is empty).")]
    EmptyDiff,

    #[error("Input does not look like a unified diff (no diff, hunk or file header line found).")]
    InvalidDiffFormat,

    #[error("git diff failed: {0}")]
    CommandError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to fetch from backend: {message}")]
    BackendError { message: String },

    #[error("Backend returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl PipelineError {
    /// Whether this failure happened after the network call was attempted.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            PipelineError::BackendError { .. } | PipelineError::MalformedResponse(_)
        )
    }
}

/// Errors from committing with a generated message.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Refusing to commit: the backend returned an empty commit message")]
    EmptyMessage,

    #[error("Failed to run git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit failed: {0}")]
    GitFailed(String),

    #[error("Commit cancelled")]
    Cancelled,
}
