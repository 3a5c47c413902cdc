//! Projection of a generation response into a presentation-agnostic view model.

use serde::Serialize;

use crate::generate::GenerationResponse;

/// Rendered in place of an empty primary commit message.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "(none)";

/// Pull request section of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrSection {
    pub title: String,
    pub body: String,
}

/// Read-only view shared by both surfaces.
///
/// Optional sections are `None` when hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    commit_message: String,
    #[serde(skip)]
    commit_message_missing: bool,
    alternatives: Option<Vec<String>>,
    labels: Option<String>,
    pr: Option<PrSection>,
}

impl ViewModel {
    /// Primary message, or [`EMPTY_MESSAGE_PLACEHOLDER`] when the service sent none.
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    /// Whether [`ViewModel::commit_message`] is the placeholder.
    pub fn commit_message_missing(&self) -> bool {
        self.commit_message_missing
    }

    pub fn alternatives(&self) -> Option<&[String]> {
        self.alternatives.as_deref()
    }

    pub fn labels(&self) -> Option<&str> {
        self.labels.as_deref()
    }

    pub fn pr(&self) -> Option<&PrSection> {
        self.pr.as_ref()
    }
}

/// Map a response and the request's PR flag to a view model.
///
/// The PR section follows `generate_pr` alone: it is shown with empty
/// values when the service left title or body out, and hidden when PR
/// generation was not requested even if the service filled them in.
pub fn render(response: &GenerationResponse, generate_pr: bool) -> ViewModel {
    let missing = response.commit_message.trim().is_empty();
    let commit_message = if missing {
        EMPTY_MESSAGE_PLACEHOLDER.to_string()
    } else {
        response.commit_message.clone()
    };

    let alternatives = (!response.alternatives.is_empty()).then(|| response.alternatives.clone());

    let labels = (!response.type_labels.is_empty()).then(|| response.type_labels.join(", "));

    let pr = generate_pr.then(|| PrSection {
        title: response.pr_title.clone().unwrap_or_default(),
        body: response.pr_body.clone().unwrap_or_default(),
    });

    ViewModel {
        commit_message,
        commit_message_missing: missing,
        alternatives,
        labels,
        pr,
    }
}
