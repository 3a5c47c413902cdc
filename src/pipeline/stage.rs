//! Per-invocation pipeline stages.

use std::fmt;

/// Stage of one suggestion invocation.
///
/// The happy path is linear from `Idle` to `Done`. `Failed` is reachable from
/// every non-terminal stage; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Acquiring,
    Validating,
    Building,
    Generating,
    Rendering,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Acquiring => "acquiring",
            Stage::Validating => "validating",
            Stage::Building => "building",
            Stage::Generating => "generating",
            Stage::Rendering => "rendering",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    pub fn can_transition_to(self, next: Stage) -> bool {
        match (self, next) {
            (from, Stage::Failed) => !from.is_terminal(),
            (Stage::Idle, Stage::Acquiring)
            | (Stage::Acquiring, Stage::Validating)
            | (Stage::Validating, Stage::Building)
            | (Stage::Building, Stage::Generating)
            | (Stage::Generating, Stage::Rendering)
            | (Stage::Rendering, Stage::Done) => true,
            _ => false,
        }
    }

    /// Non-cancellable progress text reported on entering this stage.
    pub fn progress_message(self) -> Option<&'static str> {
        match self {
            Stage::Acquiring => Some("Collecting changes..."),
            Stage::Generating => Some("Generating commit message..."),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
