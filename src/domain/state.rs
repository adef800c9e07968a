//! Request lifecycle state.
//!
//! Exactly one value is active at a time. The controller is its only writer;
//! everything else reads it through `Controller::state`.

use super::verification::VerificationResult;

/// Where the current submission stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// A request is outstanding
    Loading,

    /// The backend answered with a parsable verification
    Succeeded(VerificationResult),

    /// The request failed; the message is shown to the user as-is
    Failed(String),
}

impl RequestState {
    /// Check if a request is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the last submission has settled (successfully or not)
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// The verification payload, if the last submission succeeded
    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// The failure message, if the last submission failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short lowercase label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded(_) => "success",
            Self::Failed(_) => "error",
        }
    }
}
