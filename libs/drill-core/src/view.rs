//! Render snapshot shared by both engines.

use crate::transition::PendingTransition;
use crate::types::{BlockPhase, Feedback, SessionPhase, Word};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer needs to draw the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub phase: SessionPhase,
    /// Word being asked, `None` once complete.
    pub word: Option<Word>,
    /// Position inside the current block (learn) or run (test).
    pub index: usize,
    /// Length of the current block (learn) or run (test).
    pub len: usize,
    /// Words committed as learned so far.
    pub current_index: usize,
    pub total: usize,
    pub feedback: Feedback,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_phase: Option<BlockPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_word: Option<Word>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingTransition>,
}

impl SessionView {
    /// View shown while no session is running.
    pub fn setup() -> Self {
        Self {
            phase: SessionPhase::Setup,
            word: None,
            index: 0,
            len: 0,
            current_index: 0,
            total: 0,
            feedback: Feedback::None,
            block_phase: None,
            streak: None,
            attempt: None,
            wrong_word: None,
            pending: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_view_serializes_phase_tag() {
        let json = serde_json::to_value(SessionView::setup()).unwrap();
        assert_eq!(json["phase"], "setup");
        assert!(json["word"].is_null());
        assert!(json.get("streak").is_none());
    }
}
