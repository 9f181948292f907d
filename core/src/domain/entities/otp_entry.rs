//! One-time password entry entity: a fixed row of single-digit slots.

use serde::{Deserialize, Serialize};

/// Supported code lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeLength {
    /// Four digit codes (email signup flow)
    Four,
    /// Six digit codes
    Six,
}

impl CodeLength {
    /// Number of digit slots
    pub fn digits(self) -> usize {
        match self {
            CodeLength::Four => 4,
            CodeLength::Six => 6,
        }
    }

    /// Map a digit count to a supported length
    pub fn from_digits(digits: usize) -> Option<Self> {
        match digits {
            4 => Some(CodeLength::Four),
            6 => Some(CodeLength::Six),
            _ => None,
        }
    }
}

impl Default for CodeLength {
    fn default() -> Self {
        CodeLength::Four
    }
}

/// Code entry state for a verification screen
///
/// Each slot holds exactly one ASCII digit or nothing. The slots are
/// concatenated in index order to form the candidate code, and `focus`
/// tracks which slot currently receives input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl OtpEntry {
    /// Create an empty entry with focus on the first slot
    pub fn new(length: CodeLength) -> Self {
        Self {
            slots: vec![None; length.digits()],
            focus: 0,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false, an entry has at least four slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the focused slot
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Digit held by a slot, if any
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Slot contents as display strings, empty for unfilled slots
    pub fn digits(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.map(String::from).unwrap_or_default())
            .collect()
    }

    /// Number of filled slots
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether every slot holds a digit
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Concatenation of the filled slots in index order
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Write a single digit (or clear with an empty string) into a slot
    ///
    /// Anything other than one ASCII digit or the empty string, and any
    /// index outside the row, leaves the entry untouched. A digit written
    /// before the last slot moves focus to the next slot.
    ///
    /// Returns `true` when the entry changed.
    pub fn set_digit(&mut self, index: usize, text: &str) -> bool {
        if index >= self.slots.len() {
            return false;
        }

        let mut chars = text.chars();
        let value = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return false,
        };

        self.slots[index] = value;
        self.focus = index;
        if value.is_some() && index + 1 < self.slots.len() {
            self.focus = index + 1;
        }
        true
    }

    /// Handle a backspace key press on a slot
    ///
    /// Moves focus to the previous slot when the slot is already empty.
    /// Never changes slot contents. Returns `true` when focus moved.
    pub fn backspace(&mut self, index: usize) -> bool {
        if index >= self.slots.len() || index == 0 || self.slots[index].is_some() {
            return false;
        }
        self.focus = index - 1;
        true
    }

    /// Fill every slot from a pasted code
    ///
    /// Accepts exactly `len()` ASCII digits, ignoring surrounding
    /// whitespace. Returns `true` when the entry changed.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.chars().count() != self.slots.len() || !text.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        for (slot, c) in self.slots.iter_mut().zip(text.chars()) {
            *slot = Some(c);
        }
        self.focus = self.slots.len() - 1;
        true
    }

    /// Empty every slot and focus the first one
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.focus = 0;
    }
}
