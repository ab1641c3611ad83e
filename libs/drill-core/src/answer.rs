//! Answer checking for typed and self-graded modes.

use crate::types::Word;
use serde::{Deserialize, Serialize};

/// Binary outcome of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    pub fn from_bool(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Wrong
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// What the user submitted for the current word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    /// Free text typed in keyboard mode.
    Typed(String),
    /// Flashcard mode: the user grades themselves and is trusted.
    SelfGraded(Verdict),
}

impl Judgment {
    pub fn verdict_for(&self, word: &Word) -> Verdict {
        match self {
            Self::Typed(input) => Verdict::from_bool(check_typed_answer(input, &word.meaning_jp)),
            Self::SelfGraded(verdict) => *verdict,
        }
    }
}

/// Typed answers pass when the trimmed input is non-empty and appears
/// verbatim (case-sensitive) inside the target meaning.
pub fn check_typed_answer(input: &str, meaning: &str) -> bool {
    let clean = input.trim();
    !clean.is_empty() && meaning.contains(clean)
}
