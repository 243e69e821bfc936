use crate::{Result, analysis::AnalysisResponse};
use chrono::{DateTime, Utc};

pub const NO_ANSWER_MESSAGE: &str = "No answer returned";
pub const FAILURE_MESSAGE: &str = "An error occurred while uploading the file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Answer(String),
    NoAnswer,
    /// Carries the underlying error for logs. Users only see [`FAILURE_MESSAGE`].
    Failure(String),
}

impl SubmissionOutcome {
    pub fn from_response(response: AnalysisResponse) -> Self {
        match response.answer {
            Some(answer) if !answer.is_empty() => Self::Answer(answer),
            _ => Self::NoAnswer,
        }
    }

    pub fn reconcile(result: Result<AnalysisResponse>) -> Self {
        match result {
            Ok(response) => Self::from_response(response),
            Err(e) => Self::Failure(e.to_string()),
        }
    }

    pub fn display_text(&self) -> &str {
        match self {
            Self::Answer(answer) => answer,
            Self::NoAnswer => NO_ANSWER_MESSAGE,
            Self::Failure(_) => FAILURE_MESSAGE,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Outcome of the most recently completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    pub outcome: SubmissionOutcome,
    pub completed_at: DateTime<Utc>,
}

impl ResultState {
    pub fn new(outcome: SubmissionOutcome) -> Self {
        Self {
            outcome,
            completed_at: Utc::now(),
        }
    }

    pub fn text(&self) -> &str {
        self.outcome.display_text()
    }
}
