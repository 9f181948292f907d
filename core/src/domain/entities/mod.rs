//! Domain entities owned by a verification screen.

pub mod countdown;
pub mod otp_entry;

// Re-export commonly used types
pub use countdown::{CountdownTimer, TickOutcome};
pub use otp_entry::{CodeLength, OtpEntry};
