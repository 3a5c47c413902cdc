//! Manual-input surface: pasted diff plus style, count and PR toggle.

use std::io::{self, Write};

use crate::diff::{DiffValidator, ManualDiff};
use crate::generate::{GenerationClient, GenerationOptions};
use crate::pipeline::{Orchestrator, Outcome, Presenter};
use crate::render::ViewModel;

use super::{OutputFormat, write_view};

/// Field values of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub diff: String,
    pub style: String,
    pub num_alternatives: i64,
    pub generate_pr: bool,
}

impl FormInput {
    /// A submission with the form's initial field values.
    pub fn with_diff(diff: impl Into<String>) -> Self {
        let defaults = GenerationOptions::default();
        Self {
            diff: diff.into(),
            style: defaults.style,
            num_alternatives: defaults.num_alternatives,
            generate_pr: defaults.generate_pr,
        }
    }

    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            style: self.style.clone(),
            num_alternatives: self.num_alternatives,
            generate_pr: self.generate_pr,
        }
    }

    /// Submit the form through the shared pipeline.
    pub async fn submit<C, V, P>(&self, orchestrator: &Orchestrator<C, V>, presenter: &mut P) -> Outcome
    where
        C: GenerationClient,
        V: DiffValidator,
        P: Presenter + ?Sized,
    {
        let source = ManualDiff::new(self.diff.clone());
        orchestrator.run(&source, &self.options(), presenter).await
    }
}

/// Presenter showing a loading line while generating and the result or error below.
pub struct FormPresenter<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
    write_error: Option<io::Error>,
}

impl<O: Write, E: Write> FormPresenter<O, E> {
    pub fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            format,
            write_error: None,
        }
    }

    /// Release the writers, surfacing the first write failure.
    pub fn finish(self) -> io::Result<(O, E)> {
        match self.write_error {
            Some(e) => Err(e),
            None => Ok((self.out, self.err)),
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

impl<O: Write, E: Write> Presenter for FormPresenter<O, E> {
    fn progress(&mut self, message: &str) {
        let result = writeln!(self.err, "[..] {}", message);
        self.record(result);
    }

    fn present(&mut self, view: &ViewModel) {
        let result = write_view(&mut self.out, view, self.format);
        self.record(result);
    }

    fn present_error(&mut self, message: &str) {
        let result = writeln!(self.err, "error: {}", message);
        self.record(result);
    }
}
