//! Deck persistence.
//!
//! Decks live in memory and are written back to a single JSON file after
//! every mutation. A missing or unreadable file falls back to the built-in
//! default deck set, and a failed write is logged and otherwise ignored so
//! that studying keeps working on a read-only disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use drill_core::defaults::initial_decks;
use drill_core::{Deck, DeckColor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base name of the store file, kept stable across releases.
pub const STORAGE_KEY: &str = "espartan_decks_v2";

const STORE_VERSION: u32 = 2;

const NEW_DECK_TITLE: &str = "新規単語帳";
const NEW_DECK_DESCRIPTION: &str = "新しい単語セット";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("deck {0} does not exist")]
    DeckNotFound(String),

    #[error("word {word_id} does not exist in deck {deck_id}")]
    WordNotFound { deck_id: String, word_id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// CRUD over the deck list.
pub trait DeckStore: Send {
    fn list(&self) -> &[Deck];

    fn get(&self, id: &str) -> Result<&Deck>;

    /// Append an empty deck with placeholder metadata.
    fn create(&mut self) -> Deck;

    /// Replace the deck with the same id.
    fn save(&mut self, deck: Deck) -> Result<()>;

    fn delete(&mut self, id: &str) -> Result<()>;

    /// Remove every word with `word_id` from the deck and return the result.
    fn delete_word(&mut self, deck_id: &str, word_id: i64) -> Result<Deck>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    decks: &'a [Deck],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDecks {
    Envelope { decks: Vec<Deck> },
    Bare(Vec<Deck>),
}

/// [`DeckStore`] backed by `<data_dir>/espartan_decks_v2.json`.
pub struct JsonFileStore {
    path: PathBuf,
    decks: Vec<Deck>,
}

impl JsonFileStore {
    /// Open the store in `data_dir`, loading whatever is on disk.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(format!("{STORAGE_KEY}.json"));
        let decks = match load(&path) {
            Ok(Some(decks)) => {
                tracing::info!(path = %path.display(), decks = decks.len(), "deck store loaded");
                decks
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "no deck store yet, using defaults");
                initial_decks()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "deck store unreadable, using defaults");
                initial_decks()
            }
        };
        Self { path, decks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = write(&self.path, &self.decks) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write deck store");
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::DeckNotFound(id.to_string()))
    }

    fn next_deck_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("deck_{millis}");
            if self.decks.iter().all(|d| d.id != id) {
                return id;
            }
            millis += 1;
        }
    }
}

impl DeckStore for JsonFileStore {
    fn list(&self) -> &[Deck] {
        &self.decks
    }

    fn get(&self, id: &str) -> Result<&Deck> {
        let index = self.position(id)?;
        Ok(&self.decks[index])
    }

    fn create(&mut self) -> Deck {
        let deck = Deck {
            id: self.next_deck_id(),
            title: NEW_DECK_TITLE.to_string(),
            description: NEW_DECK_DESCRIPTION.to_string(),
            color: DeckColor::Gray,
            words: Vec::new(),
        };
        self.decks.push(deck.clone());
        self.persist();
        tracing::info!(deck_id = %deck.id, "deck created");
        deck
    }

    fn save(&mut self, deck: Deck) -> Result<()> {
        let index = self.position(&deck.id)?;
        self.decks[index] = deck;
        self.persist();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.decks.remove(index);
        self.persist();
        tracing::info!(deck_id = %id, "deck deleted");
        Ok(())
    }

    fn delete_word(&mut self, deck_id: &str, word_id: i64) -> Result<Deck> {
        let index = self.position(deck_id)?;
        let deck = &mut self.decks[index];
        let before = deck.words.len();
        deck.words.retain(|w| w.id != word_id);
        if deck.words.len() == before {
            return Err(StoreError::WordNotFound {
                deck_id: deck_id.to_string(),
                word_id,
            });
        }
        let updated = deck.clone();
        self.persist();
        Ok(updated)
    }
}

fn load(path: &Path) -> Result<Option<Vec<Deck>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let stored: StoredDecks = serde_json::from_str(&content)?;
    let decks = match stored {
        StoredDecks::Envelope { decks } | StoredDecks::Bare(decks) => decks,
    };
    Ok(Some(decks))
}

fn write(path: &Path, decks: &[Deck]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let envelope = Envelope {
        version: STORE_VERSION,
        saved_at: Utc::now(),
        decks,
    };
    std::fs::write(path, serde_json::to_vec_pretty(&envelope)?)?;
    Ok(())
}
