//! Backend-to-interaction events and the user-facing failure model.

use shared::{domain::SubmissionId, protocol::RemoteOutcome};
use thiserror::Error;

pub enum UiEvent {
    Info(String),
    EnrollmentCompleted {
        submission_id: SubmissionId,
        outcome: RemoteOutcome,
    },
    BackendFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Request,
    Transport,
    Server,
    Application,
}

impl FailureCategory {
    /// Heading shown above the failure message.
    pub fn title(self) -> &'static str {
        match self {
            Self::Request => "Request rejected",
            Self::Transport => "Connection problem",
            Self::Server => "Server error",
            Self::Application => "Not enrolled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentFailure {
    #[error("the registration request was rejected")]
    Request,
    #[error("the registration endpoint could not be resolved")]
    Path,
    #[error("the registration server failed to process the enrollment")]
    Server,
    #[error("the registration server could not be reached")]
    Network,
    #[error("the enrollment was not accepted: {0}")]
    Application(String),
    #[error("backend worker unavailable: {0}")]
    BackendUnavailable(String),
    #[error("no response from the registration service after {waited_secs}s")]
    TimedOut { waited_secs: u64 },
}

impl EnrollmentFailure {
    /// `None` for a successful outcome.
    pub fn from_outcome(outcome: &RemoteOutcome) -> Option<Self> {
        match outcome {
            RemoteOutcome::Success(_) => None,
            RemoteOutcome::RequestError => Some(Self::Request),
            RemoteOutcome::PathError => Some(Self::Path),
            RemoteOutcome::ServerError => Some(Self::Server),
            RemoteOutcome::NetworkFailure => Some(Self::Network),
            RemoteOutcome::ApplicationFailure(message) => Some(Self::Application(message.clone())),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            Self::Request => FailureCategory::Request,
            Self::Path | Self::Network | Self::BackendUnavailable(_) | Self::TimedOut { .. } => {
                FailureCategory::Transport
            }
            Self::Server => FailureCategory::Server,
            Self::Application(_) => FailureCategory::Application,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Request => {
                "Enrollment details were rejected; check the owner and pet details and retry."
                    .to_string()
            }
            Self::Path => "Enrollment service is misconfigured; please retry later.".to_string(),
            Self::Server => "Enrollment server error; please retry in a moment.".to_string(),
            Self::Network => "Server unreachable; check your connection and retry.".to_string(),
            Self::Application(message) if message.trim().is_empty() => {
                "Enrollment was not accepted; review the form and retry.".to_string()
            }
            Self::Application(message) => format!("Enrollment was not accepted: {message}"),
            Self::BackendUnavailable(_) => {
                "Enrollment worker is not running; restart the app and retry.".to_string()
            }
            Self::TimedOut { waited_secs } => {
                format!(
                    "No response from the registration service after {waited_secs}s; retry later."
                )
            }
        }
    }
}
