//! Suggestion pipeline orchestration.
//!
//! One [`Orchestrator::run`] call is one invocation: acquire the diff,
//! validate it, build the request, call the service, render the view. The
//! first failure ends the invocation and is reported once through the
//! [`Presenter`]; nothing is retried and generation cannot be cancelled.

pub mod stage;

use tracing::debug;

use crate::diff::{DiffSource, DiffValidator, MarkerValidator, validate_diff};
use crate::error::PipelineError;
use crate::generate::{GenerationClient, GenerationOptions, build_request};
use crate::render::{ViewModel, render};

pub use stage::Stage;

/// Output channel of a surface.
pub trait Presenter {
    /// Non-cancellable progress notification.
    fn progress(&mut self, message: &str);

    /// Show a finished view.
    fn present(&mut self, view: &ViewModel);

    /// Show the single failure message of an invocation.
    fn present_error(&mut self, message: &str);
}

/// Terminal result of one invocation.
#[derive(Debug)]
pub enum Outcome {
    Done(ViewModel),
    Failed {
        /// Stage that was running when the failure happened.
        stage: Stage,
        error: PipelineError,
    },
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn view(&self) -> Option<&ViewModel> {
        match self {
            Outcome::Done(view) => Some(view),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<ViewModel, PipelineError> {
        match self {
            Outcome::Done(view) => Ok(view),
            Outcome::Failed { error, .. } => Err(error),
        }
    }
}

/// Tracks the current stage of one invocation.
struct Invocation {
    stage: Stage,
}

impl Invocation {
    fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    fn enter<P: Presenter + ?Sized>(&mut self, next: Stage, presenter: &mut P) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "illegal transition {} -> {}",
            self.stage,
            next
        );
        debug!("Pipeline stage: {} -> {}", self.stage, next);
        self.stage = next;

        if let Some(message) = next.progress_message() {
            presenter.progress(message);
        }
    }
}

/// Sequences the pipeline stages. Holds no per-invocation state.
pub struct Orchestrator<C, V = MarkerValidator> {
    client: C,
    validator: V,
}

impl<C: GenerationClient> Orchestrator<C> {
    pub fn new(client: C) -> Self {
        Self::with_validator(client, MarkerValidator)
    }
}

impl<C: GenerationClient, V: DiffValidator> Orchestrator<C, V> {
    pub fn with_validator(client: C, validator: V) -> Self {
        Self { client, validator }
    }

    /// Run one invocation to `Done` or `Failed`.
    ///
    /// On success the view is passed to [`Presenter::present`]; on failure
    /// exactly one message goes to [`Presenter::present_error`] and no view
    /// is produced.
    pub async fn run<S, P>(
        &self,
        source: &S,
        options: &GenerationOptions,
        presenter: &mut P,
    ) -> Outcome
    where
        S: DiffSource + ?Sized,
        P: Presenter + ?Sized,
    {
        let mut invocation = Invocation::new();

        match self.execute(&mut invocation, source, options, presenter).await {
            Ok(view) => {
                invocation.enter(Stage::Done, presenter);
                presenter.present(&view);
                Outcome::Done(view)
            }
            Err(error) => {
                let stage = invocation.stage;
                debug!("Pipeline failed while {}: {}", stage, error);
                invocation.enter(Stage::Failed, presenter);
                presenter.present_error(&error.to_string());
                Outcome::Failed { stage, error }
            }
        }
    }

    async fn execute<S, P>(
        &self,
        invocation: &mut Invocation,
        source: &S,
        options: &GenerationOptions,
        presenter: &mut P,
    ) -> Result<ViewModel, PipelineError>
    where
        S: DiffSource + ?Sized,
        P: Presenter + ?Sized,
    {
        invocation.enter(Stage::Acquiring, presenter);
        let text = source.acquire().await?;

        invocation.enter(Stage::Validating, presenter);
        let diff = validate_diff(&self.validator, text)?;

        invocation.enter(Stage::Building, presenter);
        let request = build_request(diff, options)?;

        invocation.enter(Stage::Generating, presenter);
        let response = self.client.generate(&request).await?;

        invocation.enter(Stage::Rendering, presenter);
        Ok(render(&response, request.generate_pr()))
    }
}
