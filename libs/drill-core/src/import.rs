//! JSON deck import and export.
//!
//! # Formats
//! A bare array of words is appended to the deck being edited:
//! ```json
//! [{"id": 1901, "spelling": "modify", "meaning_jp": "修正する"}]
//! ```
//! A deck object replaces the word list and may override the deck metadata:
//! ```json
//! {"title": "Extra", "description": "...", "color": "teal", "words": [...]}
//! ```

use crate::error::{DrillError, Result};
use crate::types::{Deck, DeckColor, Word};
use serde::Serialize;
use serde_json::Value;

/// Parsed import data, not yet applied to a deck.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportPayload {
    /// Words to append.
    Words(Vec<Word>),
    /// Full deck replacement.
    Deck {
        title: Option<String>,
        description: Option<String>,
        color: Option<DeckColor>,
        words: Vec<Word>,
    },
}

impl ImportPayload {
    /// Number of words carried by the payload.
    pub fn word_count(&self) -> usize {
        match self {
            Self::Words(words) => words.len(),
            Self::Deck { words, .. } => words.len(),
        }
    }

    /// Merge into `deck`, returning the updated copy.
    pub fn apply(self, deck: &Deck) -> Deck {
        let mut updated = deck.clone();
        match self {
            Self::Words(words) => updated.words.extend(words),
            Self::Deck {
                title,
                description,
                color,
                words,
            } => {
                if let Some(title) = title {
                    updated.title = title;
                }
                if let Some(description) = description {
                    updated.description = description;
                }
                if let Some(color) = color {
                    updated.color = color;
                }
                updated.words = words;
            }
        }
        updated
    }
}

/// Parse and validate import JSON.
pub fn parse_import(content: &str) -> Result<ImportPayload> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Array(entries) => Ok(ImportPayload::Words(parse_words(entries)?)),
        Value::Object(mut map) => {
            let Some(Value::Array(entries)) = map.remove("words") else {
                return Err(DrillError::InvalidImport(
                    "provide an array of words or a deck object".to_string(),
                ));
            };
            Ok(ImportPayload::Deck {
                title: non_empty_string(map.get("title")),
                description: non_empty_string(map.get("description")),
                color: non_empty_string(map.get("color"))
                    .and_then(|c| serde_json::from_value(Value::String(c)).ok()),
                words: parse_words(entries)?,
            })
        }
        _ => Err(DrillError::InvalidImport(
            "provide an array of words or a deck object".to_string(),
        )),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn parse_words(entries: Vec<Value>) -> Result<Vec<Word>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            validate_entry(index, &entry)?;
            serde_json::from_value(entry).map_err(DrillError::from)
        })
        .collect()
}

/// Every imported word needs a non-zero id and non-empty spelling and meaning.
fn validate_entry(index: usize, entry: &Value) -> Result<()> {
    let id_ok = entry
        .get("id")
        .and_then(Value::as_i64)
        .map_or(false, |id| id != 0);
    if !id_ok {
        return Err(DrillError::InvalidWord { index, field: "id" });
    }
    for field in ["spelling", "meaning_jp"] {
        let present = entry
            .get(field)
            .and_then(Value::as_str)
            .map_or(false, |s| !s.is_empty());
        if !present {
            return Err(DrillError::InvalidWord { index, field });
        }
    }
    Ok(())
}

/// Apply the import rules to words that are already typed, such as a deck
/// edited in place.
pub fn validate_words(words: &[Word]) -> Result<()> {
    for (index, word) in words.iter().enumerate() {
        if word.id == 0 {
            return Err(DrillError::InvalidWord { index, field: "id" });
        }
        if word.spelling.is_empty() {
            return Err(DrillError::InvalidWord {
                index,
                field: "spelling",
            });
        }
        if word.meaning_jp.is_empty() {
            return Err(DrillError::InvalidWord {
                index,
                field: "meaning_jp",
            });
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ExportedDeck<'a> {
    title: &'a str,
    description: &'a str,
    color: DeckColor,
    words: &'a [Word],
}

/// Pretty-printed deck JSON that [`parse_import`] accepts back.
pub fn export_deck(deck: &Deck) -> Result<String> {
    let payload = ExportedDeck {
        title: &deck.title,
        description: &deck.description,
        color: deck.color,
        words: &deck.words,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// File name for an exported deck.
pub fn export_file_name(title: &str) -> String {
    if title.is_empty() {
        return "deck.json".to_string();
    }
    let safe: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}.json")
}
