//! # FINT OTP terminal front-end
//!
//! Drives an `OtpSession` from line-based terminal input:
//! - `args` - command line arguments
//! - `settings` - layered configuration loading
//! - `logging` - tracing subscriber setup
//! - `command` - parsing of the line commands
//! - `input` - blocking line reader feeding the screen
//! - `screen` - rendering and the interaction loop

pub mod args;
pub mod command;
pub mod input;
pub mod logging;
pub mod screen;
pub mod settings;

pub use args::Cli;
pub use command::{Command, CommandError};
pub use screen::{Exit, Screen};
