//! Value objects describing the observable state of the flow.

pub mod flow;

// Re-export commonly used types
pub use flow::{FlowPhase, Notice, OtpSnapshot, Route, SubmissionState};
