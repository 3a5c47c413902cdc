//! Commit staged changes with a generated message.
//!
//! Shells out to the system `git` binary, inheriting the user's git config,
//! hooks and signing setup.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::CommitError;
use crate::render::ViewModel;

/// Commit the index in `workdir` with the view's primary message.
///
/// Refuses when the primary message is the empty placeholder.
pub fn commit_with_view(workdir: &Path, view: &ViewModel) -> Result<(), CommitError> {
    if view.commit_message_missing() {
        return Err(CommitError::EmptyMessage);
    }
    commit_staged(workdir, view.commit_message())
}

/// `git commit -m <message>` in `workdir`.
pub fn commit_staged(workdir: &Path, message: &str) -> Result<(), CommitError> {
    if message.trim().is_empty() {
        return Err(CommitError::EmptyMessage);
    }

    run_git(workdir, &["commit", "-m", message])?;
    info!("Committed in {}", workdir.display());
    Ok(())
}

/// Run a git command and return success or a descriptive error.
fn run_git(workdir: &Path, args: &[&str]) -> Result<(), CommitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(CommitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // git reports "nothing to commit" on stdout
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(CommitError::GitFailed(detail));
    }

    Ok(())
}
