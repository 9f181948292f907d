//! Domain layer containing the OTP entities and the flow value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
