//! Presentation surfaces.
//!
//! Both surfaces drive the same [`Orchestrator`](crate::pipeline::Orchestrator)
//! and differ only in how the diff is captured and how output is shown.

pub mod command;
pub mod form;

use std::io::{self, Write};

use crate::render::ViewModel;

pub use command::{CommandPresenter, generate_commit_suggestion};
pub use form::{FormInput, FormPresenter};

/// How a finished view is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write a view in the requested format.
pub fn write_view<W: Write>(out: &mut W, view: &ViewModel, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, view).map_err(io::Error::other)?;
            writeln!(out)
        }
        OutputFormat::Text => write_text(out, view),
    }
}

fn write_text<W: Write>(out: &mut W, view: &ViewModel) -> io::Result<()> {
    writeln!(out, "Primary Commit Message")?;
    writeln!(out, "  {}", view.commit_message())?;

    if let Some(alternatives) = view.alternatives() {
        writeln!(out)?;
        writeln!(out, "Alternatives")?;
        for (idx, alt) in alternatives.iter().enumerate() {
            writeln!(out, "  {}. {}", idx + 1, alt)?;
        }
    }

    if let Some(labels) = view.labels() {
        writeln!(out)?;
        writeln!(out, "Labels")?;
        writeln!(out, "  {}", labels)?;
    }

    if let Some(pr) = view.pr() {
        writeln!(out)?;
        writeln!(out, "PR Title")?;
        writeln!(out, "  {}", pr.title)?;
        writeln!(out)?;
        writeln!(out, "PR Body")?;
        for line in pr.body.lines() {
            writeln!(out, "  {}", line)?;
        }
    }

    Ok(())
}
