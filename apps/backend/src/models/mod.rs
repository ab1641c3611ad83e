//! API request and response types

use drill_core::speech::SpeechCue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use drill_core::{
    Comparison, Deck, IdRange, InputMethod, Judgment, MatchOutcome, SessionView, StudyMode,
    Verdict, Word,
};

use crate::error::{ApiError, Result};
use crate::session::ActiveSession;

// === Deck API Types ===

/// Response for GET /api/decks
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<Deck>,
}

/// Query for GET /api/decks/:id/range
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Response for GET /api/decks/:id/range
#[derive(Debug, Serialize, Deserialize)]
pub struct RangeResponse {
    pub start: i64,
    pub end: i64,
    /// Lowest and highest id in the deck, absent for an empty deck.
    pub bounds: Option<(i64, i64)>,
    /// Words whose id falls inside `start..=end`.
    pub selected: usize,
}

/// Response for POST /api/decks/:id/import
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub deck: Deck,
}

// === Session API Types ===

/// Request for POST /api/session
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub deck_id: String,
    /// Defaults to the deck's suggested range when either bound is missing.
    pub start: Option<i64>,
    pub end: Option<i64>,
    #[serde(default)]
    pub mode: StudyMode,
    #[serde(default)]
    pub input_method: InputMethod,
}

/// Request for POST /api/session/answer
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: Uuid,
    /// Keyboard input.
    pub typed: Option<String>,
    /// Flashcard self-grade.
    pub verdict: Option<Verdict>,
}

impl AnswerRequest {
    pub fn judgment(&self) -> Result<Judgment> {
        match (&self.typed, self.verdict) {
            (Some(typed), None) => Ok(Judgment::Typed(typed.clone())),
            (None, Some(verdict)) => Ok(Judgment::SelfGraded(verdict)),
            _ => Err(ApiError::BadRequest(
                "provide exactly one of `typed` or `verdict`".to_string(),
            )),
        }
    }
}

/// Request for POST /api/session/mistake
#[derive(Debug, Serialize, Deserialize)]
pub struct MistakeRequest {
    pub session_id: Uuid,
    pub query: String,
}

/// Request for POST /api/session/mistake/resolve
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub session_id: Uuid,
}

/// Snapshot of the active session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Option<Uuid>,
    pub deck_id: Option<String>,
    pub study_mode: Option<StudyMode>,
    pub input_method: Option<InputMethod>,
    #[serde(flatten)]
    pub view: SessionView,
    pub speech: Option<SpeechCue>,
}

impl SessionResponse {
    /// Response while no session is running.
    pub fn idle() -> Self {
        Self {
            session_id: None,
            deck_id: None,
            study_mode: None,
            input_method: None,
            view: SessionView::setup(),
            speech: None,
        }
    }
}

impl From<&ActiveSession> for SessionResponse {
    fn from(session: &ActiveSession) -> Self {
        Self {
            session_id: Some(session.id),
            deck_id: Some(session.deck_id.clone()),
            study_mode: Some(session.engine.mode()),
            input_method: Some(session.input_method),
            view: session.engine.view(),
            speech: session.speech_cue(),
        }
    }
}

/// Response for POST /api/session/mistake
#[derive(Debug, Serialize, Deserialize)]
pub struct MistakeResponse {
    /// The word that was answered wrong.
    pub target: Word,
    pub outcome: MatchOutcome,
    /// Present when the search found exactly one word.
    pub comparison: Option<Comparison>,
}

impl MistakeResponse {
    pub fn new(target: Word, outcome: MatchOutcome) -> Self {
        let comparison = match &outcome {
            MatchOutcome::Single(word) => Some(Comparison {
                yours: word.clone(),
                target: target.clone(),
            }),
            _ => None,
        };
        Self {
            target,
            outcome,
            comparison,
        }
    }
}

/// Response for DELETE /api/session
#[derive(Debug, Serialize, Deserialize)]
pub struct QuitResponse {
    pub quit: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(typed: Option<&str>, verdict: Option<Verdict>) -> AnswerRequest {
        AnswerRequest {
            session_id: Uuid::nil(),
            typed: typed.map(str::to_string),
            verdict,
        }
    }

    #[test]
    fn judgment_from_answer_request() {
        assert_eq!(
            answer(Some("合併"), None).judgment().unwrap(),
            Judgment::Typed("合併".to_string())
        );
        assert_eq!(
            answer(None, Some(Verdict::Wrong)).judgment().unwrap(),
            Judgment::SelfGraded(Verdict::Wrong)
        );
        assert!(answer(None, None).judgment().is_err());
        assert!(answer(Some("x"), Some(Verdict::Correct)).judgment().is_err());
    }

    #[test]
    fn single_match_builds_comparison() {
        let target = Word::new(1, "deduce", "推測する");
        let yours = Word::new(-1, "reduce", "減らす");
        let response = MistakeResponse::new(target.clone(), MatchOutcome::Single(yours.clone()));
        let comparison = response.comparison.unwrap();
        assert_eq!(comparison.yours, yours);
        assert_eq!(comparison.target, target);

        let response = MistakeResponse::new(target, MatchOutcome::NotFound);
        assert!(response.comparison.is_none());
    }

    #[test]
    fn idle_response_is_setup_phase() {
        let json = serde_json::to_value(SessionResponse::idle()).unwrap();
        assert_eq!(json["phase"], "setup");
        assert!(json["session_id"].is_null());
    }
}
