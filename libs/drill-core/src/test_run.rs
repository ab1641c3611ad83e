//! Perfect-streak test mode.
//!
//! One shuffled pass over the whole selection that has to be answered
//! without a single mistake. Any wrong answer throws the pass away and starts
//! a new attempt over a fresh shuffle of the full selection.

use crate::answer::Judgment;
use crate::error::{DrillError, Result};
use crate::shuffle::shuffled;
use crate::timing::TEST_RESTART_MS;
use crate::transition::{PendingTransition, TransitionAction, TransitionSlot, TransitionToken};
use crate::types::{CompletionMode, Feedback, SessionPhase, StudyQueue, Word};
use crate::view::SessionView;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Progress through the current attempt.
#[derive(Debug, Clone)]
pub struct TestRunState {
    pub queue: Vec<Word>,
    pub index: usize,
    pub streak: usize,
    pub attempt: u32,
    pub wrong_word: Option<Word>,
}

/// Result of answering one word in test mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    /// Correct; the next word is up.
    Next,
    /// Correct and it was the last word.
    Won,
    /// Wrong; the run restarts when this transition fires.
    Restart(PendingTransition),
}

pub struct PerfectStreakRun<R = StdRng> {
    selection: StudyQueue,
    state: TestRunState,
    won: bool,
    transitions: TransitionSlot,
    rng: R,
}

impl PerfectStreakRun<StdRng> {
    pub fn new(selection: StudyQueue) -> Result<Self> {
        Self::with_rng(selection, StdRng::from_entropy())
    }
}

impl<R: Rng> PerfectStreakRun<R> {
    pub fn with_rng(selection: StudyQueue, mut rng: R) -> Result<Self> {
        if selection.is_empty() {
            return Err(DrillError::EmptyDeck);
        }
        let queue = shuffled(selection.words(), &mut rng);
        Ok(Self {
            selection,
            state: TestRunState {
                queue,
                index: 0,
                streak: 0,
                attempt: 1,
                wrong_word: None,
            },
            won: false,
            transitions: TransitionSlot::default(),
            rng,
        })
    }

    pub fn state(&self) -> &TestRunState {
        &self.state
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn phase(&self) -> SessionPhase {
        if self.won {
            SessionPhase::Complete {
                mode: CompletionMode::Test,
            }
        } else {
            SessionPhase::Test
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        if self.won {
            return None;
        }
        self.state.queue.get(self.state.index)
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.transitions.pending()
    }

    pub fn is_presenting(&self) -> bool {
        !self.won && self.state.wrong_word.is_none()
    }

    pub fn answer(&mut self, judgment: &Judgment) -> Result<RunStep> {
        if !self.is_presenting() {
            return Err(DrillError::NotPresenting);
        }
        let word = self
            .state
            .queue
            .get(self.state.index)
            .ok_or(DrillError::NotPresenting)?;

        if judgment.verdict_for(word).is_correct() {
            self.state.streak += 1;
            self.state.index += 1;
            if self.state.index >= self.state.queue.len() {
                debug!(streak = self.state.streak, attempt = self.state.attempt, "test run won");
                self.won = true;
                return Ok(RunStep::Won);
            }
            return Ok(RunStep::Next);
        }

        self.state.streak = 0;
        self.state.wrong_word = Some(word.clone());
        let pending = self
            .transitions
            .schedule(TransitionAction::RestartRun, TEST_RESTART_MS);
        debug!(attempt = self.state.attempt, token = pending.token, "test run broken");
        Ok(RunStep::Restart(pending))
    }

    /// Keep the offending word on screen while the user inspects it.
    pub fn open_mistake(&mut self) -> Result<Word> {
        let word = self
            .state
            .wrong_word
            .clone()
            .ok_or(DrillError::NotPresenting)?;
        self.transitions.cancel();
        Ok(word)
    }

    /// The user is done with the matcher: restart right away.
    pub fn resolve_mistake(&mut self) -> Result<()> {
        if self.state.wrong_word.is_none() {
            return Err(DrillError::NotPresenting);
        }
        self.transitions.cancel();
        self.restart();
        Ok(())
    }

    pub fn fire(&mut self, token: TransitionToken) -> bool {
        match self.transitions.take_if_current(token) {
            Some(TransitionAction::RestartRun) => {
                self.restart();
                true
            }
            _ => false,
        }
    }

    pub fn cancel_pending(&mut self) -> Option<PendingTransition> {
        self.transitions.cancel()
    }

    pub fn quit(mut self) -> Option<PendingTransition> {
        self.transitions.cancel()
    }

    pub fn view(&self) -> SessionView {
        let feedback = if self.state.wrong_word.is_some() {
            Feedback::Wrong
        } else {
            Feedback::None
        };
        SessionView {
            phase: self.phase(),
            word: self.current_word().cloned(),
            index: self.state.index,
            len: self.state.queue.len(),
            current_index: self.state.index,
            total: self.state.queue.len(),
            feedback,
            block_phase: None,
            streak: Some(self.state.streak),
            attempt: Some(self.state.attempt),
            wrong_word: self.state.wrong_word.clone(),
            pending: self.transitions.pending().copied(),
        }
    }

    fn restart(&mut self) {
        self.state.queue = shuffled(self.selection.words(), &mut self.rng);
        self.state.index = 0;
        self.state.streak = 0;
        self.state.wrong_word = None;
        self.state.attempt += 1;
        debug!(attempt = self.state.attempt, "test run restarted");
    }
}
