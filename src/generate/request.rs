//! Generation request types and the bounded request builder.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::diff::ValidatedDiff;
use crate::error::PipelineError;

/// Inclusive bounds on the number of alternative messages the service accepts.
pub const MIN_ALTERNATIVES: i64 = 1;
pub const MAX_ALTERNATIVES: i64 = 5;

/// Commit message convention requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommitStyle {
    Conventional,
    Gitmoji,
    Plain,
}

impl CommitStyle {
    /// Wire name sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitStyle::Conventional => "CONVENTIONAL",
            CommitStyle::Gitmoji => "GITMOJI",
            CommitStyle::Plain => "PLAIN",
        }
    }
}

impl fmt::Display for CommitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitStyle {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CONVENTIONAL" => Ok(Self::Conventional),
            "GITMOJI" => Ok(Self::Gitmoji),
            "PLAIN" => Ok(Self::Plain),
            _ => Err(PipelineError::InvalidConfig(format!(
                "unknown commit style '{}' (expected CONVENTIONAL, GITMOJI or PLAIN)",
                s
            ))),
        }
    }
}

/// Unvalidated options as a surface collects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub style: String,
    pub num_alternatives: i64,
    pub generate_pr: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            style: CommitStyle::Conventional.as_str().to_string(),
            num_alternatives: 2,
            generate_pr: true,
        }
    }
}

/// A bounded request to the generation service. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    diff_content: String,
    style: CommitStyle,
    num_alternatives: u8,
    generate_pr: bool,
}

impl GenerationRequest {
    pub fn diff_content(&self) -> &str {
        &self.diff_content
    }

    pub fn style(&self) -> CommitStyle {
        self.style
    }

    pub fn num_alternatives(&self) -> u8 {
        self.num_alternatives
    }

    pub fn generate_pr(&self) -> bool {
        self.generate_pr
    }
}

/// Build a request from validated diff text and raw surface options.
///
/// An unknown style or an alternative count outside
/// [`MIN_ALTERNATIVES`]..=[`MAX_ALTERNATIVES`] is rejected with
/// [`PipelineError::InvalidConfig`]; the count is never clamped.
pub fn build_request(
    diff: ValidatedDiff,
    options: &GenerationOptions,
) -> Result<GenerationRequest, PipelineError> {
    let style: CommitStyle = options.style.parse()?;

    if !(MIN_ALTERNATIVES..=MAX_ALTERNATIVES).contains(&options.num_alternatives) {
        return Err(PipelineError::InvalidConfig(format!(
            "number of alternatives must be between {} and {}, got {}",
            MIN_ALTERNATIVES, MAX_ALTERNATIVES, options.num_alternatives
        )));
    }

    let num_alternatives = u8::try_from(options.num_alternatives).map_err(|_| {
        PipelineError::InvalidConfig(format!(
            "number of alternatives out of range: {}",
            options.num_alternatives
        ))
    })?;

    Ok(GenerationRequest {
        diff_content: diff.into_inner(),
        style,
        num_alternatives,
        generate_pr: options.generate_pr,
    })
}
