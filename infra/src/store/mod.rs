//! Auth token storage
//!
//! Implementations of `SessionStoreTrait` keyed by the verified email.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
