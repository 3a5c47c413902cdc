//! Automatic-capture surface: one action, no arguments.
//!
//! Captures the diff from the bound workspace, reports progress, then shows a
//! read-only result view or a single error notification.

use std::io::{self, Write};

use crate::diff::{DiffValidator, WorkspaceDiff};
use crate::generate::{GenerationClient, GenerationOptions};
use crate::pipeline::{Orchestrator, Outcome, Presenter};
use crate::render::ViewModel;

use super::{OutputFormat, write_view};

const VIEW_TITLE: &str = "AI Commit Messages";

/// Presenter writing the result view to `out` and notifications to `notify`.
pub struct CommandPresenter<O: Write, N: Write> {
    out: O,
    notify: N,
    format: OutputFormat,
    write_error: Option<io::Error>,
}

impl<O: Write, N: Write> CommandPresenter<O, N> {
    pub fn new(out: O, notify: N, format: OutputFormat) -> Self {
        Self {
            out,
            notify,
            format,
            write_error: None,
        }
    }

    /// Release the writers, surfacing the first write failure.
    pub fn finish(self) -> io::Result<(O, N)> {
        match self.write_error {
            Some(e) => Err(e),
            None => Ok((self.out, self.notify)),
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result
            && self.write_error.is_none()
        {
            self.write_error = Some(e);
        }
    }
}

impl<O: Write, N: Write> Presenter for CommandPresenter<O, N> {
    fn progress(&mut self, message: &str) {
        let result = writeln!(self.notify, "{}", message);
        self.record(result);
    }

    fn present(&mut self, view: &ViewModel) {
        let result = match self.format {
            OutputFormat::Text => writeln!(self.out, "== {} ==\n", VIEW_TITLE)
                .and_then(|_| write_view(&mut self.out, view, self.format)),
            OutputFormat::Json => write_view(&mut self.out, view, self.format),
        };
        self.record(result);
    }

    fn present_error(&mut self, message: &str) {
        let result = writeln!(self.notify, "Error: {}", message);
        self.record(result);
    }
}

/// The "generate commit suggestion" action.
///
/// Uses the fixed options of this surface: conventional style, two
/// alternatives, PR generation on.
pub async fn generate_commit_suggestion<C, V, P>(
    orchestrator: &Orchestrator<C, V>,
    source: &WorkspaceDiff,
    presenter: &mut P,
) -> Outcome
where
    C: GenerationClient,
    V: DiffValidator,
    P: Presenter + ?Sized,
{
    orchestrator
        .run(source, &GenerationOptions::default(), presenter)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{CaptureMode, Workspace};
    use crate::error::PipelineError;
    use crate::generate::GenerationResponse;
    use crate::generate::client::MockGenerationClient;
    use crate::render::render;

    #[test]
    fn test_present_writes_titled_view() {
        let mut presenter = CommandPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        let view = render(
            &GenerationResponse {
                commit_message: "docs: fix typo".to_string(),
                ..GenerationResponse::default()
            },
            false,
        );
        presenter.present(&view);

        let (out, notify) = presenter.finish().unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("== AI Commit Messages =="));
        assert!(out.contains("  docs: fix typo"));
        assert!(notify.is_empty());
    }

    #[test]
    fn test_present_error_goes_to_notify() {
        let mut presenter = CommandPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        presenter.present_error("No workspace folder open.");

        let (out, notify) = presenter.finish().unwrap();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(notify).unwrap(),
            "Error: No workspace folder open.\n"
        );
    }

    #[tokio::test]
    async fn test_generate_without_workspace_reports_single_error() {
        let mut client = MockGenerationClient::new();
        client.expect_generate().times(0);
        let orchestrator = Orchestrator::new(client);

        let source = WorkspaceDiff::new(Workspace::default(), CaptureMode::Head);
        let mut presenter = CommandPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        let outcome = generate_commit_suggestion(&orchestrator, &source, &mut presenter).await;

        assert!(matches!(
            outcome.into_result(),
            Err(PipelineError::NoWorkspace)
        ));
        let (out, notify) = presenter.finish().unwrap();
        assert!(out.is_empty());
        let notify = String::from_utf8(notify).unwrap();
        assert_eq!(notify.matches("Error:").count(), 1);
    }
}
