//! Line commands accepted by the terminal screen

use thiserror::Error;

/// Usage text printed on startup and after unknown input
pub const HELP: &str = "\
Commands:
  <digits>       paste the whole code
  d <slot> <n>   type digit n into a slot
  x <slot>       clear a slot
  b <slot>       backspace on a slot
  s              submit
  r              resend code
  c              clear all slots
  q              quit
Slots are numbered from 1.";

/// One parsed input line; slot indices are zero-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Paste(String),
    SetDigit { index: usize, text: String },
    Backspace(usize),
    Submit,
    Resend,
    Clear,
    Show,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing slot number")]
    MissingSlot,

    #[error("Slot must be between 1 and {max}")]
    SlotOutOfRange { max: usize },

    #[error("Usage: d <slot> <digit>")]
    MissingDigit,
}

impl Command {
    /// Parse a line typed on a screen with `slots` digit slots
    pub fn parse(line: &str, slots: usize) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Show);
        }
        if line.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Command::Paste(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let command = match head {
            "s" | "submit" => Command::Submit,
            "r" | "resend" => Command::Resend,
            "c" | "clear" => Command::Clear,
            "q" | "quit" | "exit" => Command::Quit,
            "d" | "digit" => {
                let index = parse_slot(parts.next(), slots)?;
                let text = parts.next().ok_or(CommandError::MissingDigit)?;
                Command::SetDigit {
                    index,
                    text: text.to_string(),
                }
            }
            "x" => Command::SetDigit {
                index: parse_slot(parts.next(), slots)?,
                text: String::new(),
            },
            "b" | "backspace" => Command::Backspace(parse_slot(parts.next(), slots)?),
            _ => return Err(CommandError::Unknown(line.to_string())),
        };

        match parts.next() {
            Some(_) => Err(CommandError::Unknown(line.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_slot(token: Option<&str>, slots: usize) -> Result<usize, CommandError> {
    let token = token.ok_or(CommandError::MissingSlot)?;
    match token.parse::<usize>() {
        Ok(slot) if (1..=slots).contains(&slot) => Ok(slot - 1),
        _ => Err(CommandError::SlotOutOfRange { max: slots }),
    }
}
