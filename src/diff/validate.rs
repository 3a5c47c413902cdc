//! Boundary check that text looks like a unified diff.
//!
//! This is a gate against obviously non-diff input such as prose, not a
//! diff parser: a single marker line anywhere in the text is enough, and
//! headers are never cross-checked against hunks.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::PipelineError;

/// One alternative per accepted marker line:
/// `diff --git a/.. b/..`, a hunk header, `+++ b/..` or `--- a/..`.
static MARKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:diff --git a/.+ b/.+|@@ -\d+(?:,\d+)? \+\d+(?:,\d+)? @@.*|\+\+\+ b/.+|--- a/.+)$",
    )
    .expect("Invalid regex")
});

/// Decides whether text is plausibly a diff.
pub trait DiffValidator: Send + Sync {
    fn looks_like_diff(&self, text: &str) -> bool;
}

/// Line-by-line marker matching, unanchored to the start of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerValidator;

impl DiffValidator for MarkerValidator {
    fn looks_like_diff(&self, text: &str) -> bool {
        text.lines()
            .any(|line| MARKER_LINE.is_match(line.trim_end_matches('\r')))
    }
}

/// Diff text that has passed a [`DiffValidator`].
///
/// Only [`validate_diff`] constructs this, so holding one proves the text
/// was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDiff(String);

impl ValidatedDiff {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Run the emptiness check and the validator over raw diff text.
///
/// Whitespace-only text is reported as [`PipelineError::EmptyDiff`]; text the
/// validator rejects is [`PipelineError::InvalidDiffFormat`].
pub fn validate_diff<V: DiffValidator + ?Sized>(
    validator: &V,
    text: String,
) -> Result<ValidatedDiff, PipelineError> {
    if text.trim().is_empty() {
        return Err(PipelineError::EmptyDiff);
    }

    if !validator.looks_like_diff(&text) {
        return Err(PipelineError::InvalidDiffFormat);
    }

    Ok(ValidatedDiff(text))
}
