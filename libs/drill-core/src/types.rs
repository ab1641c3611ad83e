//! Core types for the vocabulary drill.

use crate::error::{DrillError, Result};
use serde::{Deserialize, Serialize};

/// A single vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub spelling: String,
    pub meaning_jp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_simple: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub katakana: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_jp: Option<String>,
}

impl Word {
    /// Create a word with only the required fields set.
    pub fn new(id: i64, spelling: impl Into<String>, meaning_jp: impl Into<String>) -> Self {
        Self {
            id,
            spelling: spelling.into(),
            meaning_jp: meaning_jp.into(),
            meaning_simple: None,
            phonetic: None,
            katakana: None,
            etymology: None,
            scene: None,
            story: None,
            example: None,
            example_jp: None,
        }
    }

    /// Builder-style setter for the plain-language meaning.
    pub fn with_simple(mut self, meaning_simple: impl Into<String>) -> Self {
        self.meaning_simple = Some(meaning_simple.into());
        self
    }
}

/// Deck accent color. Unknown labels deserialize to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DeckColor {
    #[default]
    Indigo,
    Gray,
    Teal,
    Amber,
}

impl From<String> for DeckColor {
    fn from(label: String) -> Self {
        match label.as_str() {
            "gray" => Self::Gray,
            "teal" => Self::Teal,
            "amber" => Self::Amber,
            _ => Self::Indigo,
        }
    }
}

/// An ordered collection of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: DeckColor,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Deck {
    /// Lowest and highest word id in the deck.
    pub fn id_bounds(&self) -> Option<(i64, i64)> {
        let min = self.words.iter().map(|w| w.id).min()?;
        let max = self.words.iter().map(|w| w.id).max()?;
        Some((min, max))
    }
}

/// Inclusive word id range used to select a study queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub start: i64,
    pub end: i64,
}

impl IdRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Range proposed when a deck is opened: the first 25 ids, capped at the
    /// deck's highest id.
    pub fn suggested_for(deck: &Deck) -> Self {
        match deck.id_bounds() {
            Some((min, max)) => Self::new(min, (min + 24).min(max)),
            None => Self::new(0, 0),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        id >= self.start && id <= self.end
    }

    /// Select the words of `deck` whose id falls in this range, in deck order.
    pub fn select(&self, deck: &Deck) -> Result<StudyQueue> {
        if deck.words.is_empty() {
            return Err(DrillError::EmptyDeck);
        }
        let words: Vec<Word> = deck
            .words
            .iter()
            .filter(|w| self.contains(w.id))
            .cloned()
            .collect();
        if words.is_empty() {
            return Err(DrillError::EmptySelection {
                start: self.start,
                end: self.end,
            });
        }
        Ok(StudyQueue { words })
    }
}

/// Words selected for one session. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyQueue {
    words: Vec<Word>,
}

impl StudyQueue {
    /// Build a queue directly from words. Returns `None` when empty.
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Feedback shown for the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
}

/// Sub-phase of a block, reserved for input-method specific flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPhase {
    #[default]
    Meaning,
    Pronounce,
}

/// Which kind of session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    Learn,
    Test,
}

/// Phase signal consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Setup,
    Learning,
    Review,
    Test,
    Complete { mode: CompletionMode },
}

/// Session flavour chosen at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    #[default]
    Learn,
    Test,
}

/// How the user answers each word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMethod {
    #[default]
    Flashcard,
    Keyboard,
}
