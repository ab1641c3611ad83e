//! Core vocabulary drill library.
//!
//! Provides:
//! - Block/review study progression and the perfect-streak test run
//! - Mistake matcher (lexical overlap search over meanings)
//! - Answer checking for typed and self-graded modes
//! - Deck JSON import/export and the built-in default deck
//! - Shared types (Word, Deck, IdRange, SessionPhase, etc.)

pub mod answer;
pub mod defaults;
pub mod error;
pub mod import;
pub mod matcher;
pub mod shuffle;
pub mod speech;
pub mod study;
pub mod test_run;
pub mod timing;
pub mod transition;
pub mod types;
pub mod view;

pub use answer::{check_typed_answer, Judgment, Verdict};
pub use error::{DrillError, Result};
pub use matcher::{find_candidates, find_words, Comparison, MatchCandidate, MatchOutcome};
pub use study::StudySession;
pub use test_run::{PerfectStreakRun, RunStep};
pub use transition::{PendingTransition, TransitionAction, TransitionToken};
pub use types::{
    BlockPhase, CompletionMode, Deck, DeckColor, Feedback, IdRange, InputMethod, SessionPhase,
    StudyMode, StudyQueue, Word,
};
pub use view::SessionView;
