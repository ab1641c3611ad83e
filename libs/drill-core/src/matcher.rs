//! Mistake matcher.
//!
//! After a wrong answer the user types what they *thought* the word meant.
//! The matcher scores every dictionary entry by lexical overlap between that
//! text and the entry's meanings, so the user can find the word they mixed up
//! with the target.

use crate::types::Word;
use serde::{Deserialize, Serialize};

/// Bonus when the whole query appears inside the meanings.
const CONTAINS_BONUS: f64 = 20.0;

/// Weight applied to the character overlap rate.
const OVERLAP_WEIGHT: f64 = 10.0;

/// Overlap rates below this contribute nothing.
const OVERLAP_THRESHOLD: f64 = 0.5;

/// Commonly confused words searched alongside the active deck.
/// They use negative ids so they never collide with deck words.
const CONFUSABLES: &[(i64, &str, &str)] = &[
    (-1, "reduce", "減らす"),
    (-2, "produce", "生産する"),
    (-3, "induce", "誘発する"),
    (-4, "seduce", "誘惑する"),
    (-5, "assent", "同意する"),
    (-6, "ascent", "上昇"),
];

/// A dictionary word and how well it matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub word: Word,
    pub score: f64,
}

/// The fixed list of commonly confused words.
pub fn confusable_words() -> Vec<Word> {
    CONFUSABLES
        .iter()
        .map(|&(id, spelling, meaning)| Word::new(id, spelling, meaning))
        .collect()
}

/// Dictionary searched for a deck: its words followed by the confusables.
pub fn dictionary_for(deck_words: &[Word]) -> Vec<Word> {
    let mut dictionary = deck_words.to_vec();
    dictionary.extend(confusable_words());
    dictionary
}

/// Score a single word against an already-trimmed, non-empty query.
pub fn score(query: &str, word: &Word) -> f64 {
    let meanings = format!(
        "{} {}",
        word.meaning_jp,
        word.meaning_simple.as_deref().unwrap_or("")
    );

    let mut score = 0.0;
    if meanings.contains(query) {
        score += CONTAINS_BONUS;
    }

    let query_len = query.chars().count();
    let matched = query.chars().filter(|&c| meanings.contains(c)).count();
    let rate = matched as f64 / query_len as f64;
    if rate >= OVERLAP_THRESHOLD {
        score += rate * OVERLAP_WEIGHT;
    }
    score
}

/// Rank `dictionary` against `query`, best first.
///
/// Words without any signal are dropped, ties keep dictionary order and only
/// the first (highest-ranked) word of each spelling is kept.
pub fn find_candidates(query: &str, dictionary: &[Word]) -> Vec<MatchCandidate> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<MatchCandidate> = dictionary
        .iter()
        .map(|word| MatchCandidate {
            score: score(query, word),
            word: word.clone(),
        })
        .filter(|c| c.score > 0.0)
        .collect();

    // sort_by is stable, so equal scores stay in dictionary order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = std::collections::HashSet::new();
    scored.retain(|c| seen.insert(c.word.spelling.clone()));
    scored
}

/// Ranked words only.
pub fn find_words(query: &str, dictionary: &[Word]) -> Vec<Word> {
    find_candidates(query, dictionary)
        .into_iter()
        .map(|c| c.word)
        .collect()
}

/// How the presentation layer should react to a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "words", rename_all = "snake_case")]
pub enum MatchOutcome {
    NotFound,
    /// Exactly one hit: go straight to the comparison.
    Single(Word),
    /// Several hits: let the user pick.
    Multiple(Vec<Word>),
}

impl From<Vec<Word>> for MatchOutcome {
    fn from(mut words: Vec<Word>) -> Self {
        match words.len() {
            0 => Self::NotFound,
            1 => Self::Single(words.remove(0)),
            _ => Self::Multiple(words),
        }
    }
}

/// Head-to-head view of the word the user had in mind and the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub yours: Word,
    pub target: Word,
}
