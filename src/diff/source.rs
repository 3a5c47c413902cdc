//! Diff acquisition: workspace capture via the system `git`, or manual text.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use git2::Repository;
use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;

/// Produces the raw diff text for one invocation.
#[async_trait]
pub trait DiffSource: Send + Sync {
    async fn acquire(&self) -> Result<String, PipelineError>;
}

/// Folders bound to the current session, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    /// Bind the working directory of the repository containing `start`.
    ///
    /// Binds nothing when `start` is not inside a non-bare git repository.
    pub fn discover(start: &Path) -> Self {
        let folder = Repository::discover(start)
            .ok()
            .and_then(|repo| repo.workdir().map(Path::to_path_buf));

        match folder {
            Some(path) => {
                debug!("Discovered workspace at {}", path.display());
                Self::new(vec![path])
            }
            None => {
                debug!("No git repository found from {}", start.display());
                Self::default()
            }
        }
    }

    pub fn first_folder(&self) -> Option<&Path> {
        self.folders.first().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Which changes the workspace capture diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Working tree and index against the last commit (`git diff HEAD`).
    #[default]
    Head,
    /// Index only (`git diff --cached`).
    Staged,
}

impl CaptureMode {
    fn git_args(self) -> [&'static str; 2] {
        match self {
            CaptureMode::Head => ["diff", "HEAD"],
            CaptureMode::Staged => ["diff", "--cached"],
        }
    }
}

/// Captures the diff by running git in the first bound workspace folder.
#[derive(Debug, Clone)]
pub struct WorkspaceDiff {
    workspace: Workspace,
    mode: CaptureMode,
}

impl WorkspaceDiff {
    pub fn new(workspace: Workspace, mode: CaptureMode) -> Self {
        Self { workspace, mode }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}

#[async_trait]
impl DiffSource for WorkspaceDiff {
    async fn acquire(&self) -> Result<String, PipelineError> {
        let cwd = self
            .workspace
            .first_folder()
            .ok_or(PipelineError::NoWorkspace)?;

        if which::which("git").is_err() {
            return Err(PipelineError::CommandError(
                "git executable not found on PATH. Install git and try again.".to_string(),
            ));
        }

        let args = self.mode.git_args();
        debug!("Running git {} in {}", args.join(" "), cwd.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::CommandError(format!("failed to run git: {e}")))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        if !output.status.success() {
            let detail = if stderr.is_empty() {
                match output.status.code() {
                    Some(code) => format!("git exited with code {code}"),
                    None => "git was terminated by a signal".to_string(),
                }
            } else {
                stderr.to_string()
            };
            return Err(PipelineError::CommandError(detail));
        }

        if !stderr.is_empty() {
            return Err(PipelineError::CommandError(stderr.to_string()));
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Captured {} bytes of diff", diff.len());
        Ok(diff)
    }
}

/// Text entered by the user, passed through unchanged.
#[derive(Debug, Clone, Default)]
pub struct ManualDiff {
    text: String,
}

impl ManualDiff {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl DiffSource for ManualDiff {
    async fn acquire(&self) -> Result<String, PipelineError> {
        Ok(self.text.clone())
    }
}
