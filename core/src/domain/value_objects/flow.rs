//! Observable state of the verification flow.

use serde::{Deserialize, Serialize};

use crate::domain::entities::CountdownTimer;

/// Progress of the verify request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted yet
    Idle,
    /// Verify request in flight
    Submitting,
    /// Code accepted by the backend
    Succeeded,
    /// Last attempt failed, with the message shown to the user
    Failed(String),
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

/// Coarse phase of the flow
///
/// A rejected attempt is reported through `SubmissionState::Failed`
/// while the phase is back at `Entering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    Entering,
    Submitting,
    Accepted,
}

impl From<&SubmissionState> for FlowPhase {
    fn from(state: &SubmissionState) -> Self {
        match state {
            SubmissionState::Submitting => FlowPhase::Submitting,
            SubmissionState::Succeeded => FlowPhase::Accepted,
            SubmissionState::Idle | SubmissionState::Failed(_) => FlowPhase::Entering,
        }
    }
}

/// Navigation target signalled by the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Authenticated home screen
    Home,
}

/// User-facing alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

/// Point-in-time view of a verification session, published on every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpSnapshot {
    /// Slot contents, empty string for unfilled slots
    pub digits: Vec<String>,
    /// Focused slot index
    pub focus: usize,
    /// Seconds left before resend is allowed
    pub seconds_remaining: u32,
    /// Whether resend may be requested
    pub resend_available: bool,
    /// Whether a resend request is in flight
    pub resend_in_flight: bool,
    /// Verify request progress
    pub submission: SubmissionState,
    /// Coarse flow phase
    pub phase: FlowPhase,
    /// Whether the submit action is enabled
    pub can_submit: bool,
    /// Alert waiting to be shown
    pub notice: Option<Notice>,
    /// Navigation waiting to be performed
    pub navigation: Option<Route>,
}

impl OtpSnapshot {
    /// Candidate code formed by the filled slots
    pub fn code(&self) -> String {
        self.digits.concat()
    }

    /// Countdown text shown under the code entry
    pub fn timer_label(&self) -> String {
        CountdownTimer::label_for(self.seconds_remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_submission() {
        assert_eq!(FlowPhase::from(&SubmissionState::Idle), FlowPhase::Entering);
        assert_eq!(FlowPhase::from(&SubmissionState::Submitting), FlowPhase::Submitting);
        assert_eq!(FlowPhase::from(&SubmissionState::Succeeded), FlowPhase::Accepted);
        assert_eq!(
            FlowPhase::from(&SubmissionState::Failed("Invalid OTP".into())),
            FlowPhase::Entering
        );
    }

    #[test]
    fn test_submission_state_serialization() {
        let json = serde_json::to_string(&SubmissionState::Failed("Invalid OTP".into())).unwrap();
        assert_eq!(json, r#"{"state":"failed","reason":"Invalid OTP"}"#);
    }
}
