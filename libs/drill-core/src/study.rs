//! Block/review progression for normal learning.
//!
//! Words are cleared five at a time. A wrong answer sends the learner back to
//! the start of the (reshuffled) block, and every 25 words, plus once at the
//! end of the queue, the most recent 25 words come back as one review block.

use crate::answer::Judgment;
use crate::error::{DrillError, Result};
use crate::shuffle::shuffled;
use crate::timing::{
    BLOCK_SIZE, CORRECT_ADVANCE_MS, RESOLVED_RESET_MS, REVIEW_INTERVAL, WRONG_RESET_MS,
};
use crate::transition::{PendingTransition, TransitionAction, TransitionSlot, TransitionToken};
use crate::types::{BlockPhase, CompletionMode, Feedback, SessionPhase, StudyQueue, Word};
use crate::view::SessionView;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Words currently being drilled, in presentation order.
#[derive(Debug, Clone, Default)]
pub struct BlockState {
    pub words: Vec<Word>,
    pub index: usize,
    pub phase: BlockPhase,
    pub feedback: Feedback,
}

impl BlockState {
    fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            index: 0,
            phase: BlockPhase::Meaning,
            feedback: Feedback::None,
        }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.words.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Learning,
    Review,
    Complete,
}

/// Review triggers when the next global index lands on a review boundary or
/// reaches the end of the queue.
pub fn is_review_point(next_index: usize, queue_len: usize) -> bool {
    (next_index > 0 && next_index % REVIEW_INTERVAL == 0) || next_index >= queue_len
}

/// Queue range covered by the review that starts at `next_index`.
pub fn review_window(next_index: usize, queue_len: usize) -> std::ops::Range<usize> {
    let end = next_index.min(queue_len);
    let start = next_index.saturating_sub(REVIEW_INTERVAL).min(end);
    start..end
}

/// Normal-learning session over a fixed queue.
pub struct StudySession<R = StdRng> {
    queue: StudyQueue,
    current_index: usize,
    block: BlockState,
    stage: Stage,
    transitions: TransitionSlot,
    rng: R,
}

impl StudySession<StdRng> {
    pub fn new(queue: StudyQueue) -> Result<Self> {
        Self::with_rng(queue, StdRng::from_entropy())
    }
}

impl<R: Rng> StudySession<R> {
    /// Start the course at the first block.
    pub fn with_rng(queue: StudyQueue, rng: R) -> Result<Self> {
        if queue.is_empty() {
            return Err(DrillError::EmptyDeck);
        }
        let mut session = Self {
            queue,
            current_index: 0,
            block: BlockState::default(),
            stage: Stage::Learning,
            transitions: TransitionSlot::default(),
            rng,
        };
        session.load_block(0);
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Learning => SessionPhase::Learning,
            Stage::Review => SessionPhase::Review,
            Stage::Complete => SessionPhase::Complete {
                mode: CompletionMode::Learn,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    pub fn block(&self) -> &BlockState {
        &self.block
    }

    pub fn current_word(&self) -> Option<&Word> {
        if self.is_complete() {
            return None;
        }
        self.block.current()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn queue(&self) -> &StudyQueue {
        &self.queue
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.transitions.pending()
    }

    /// Whether an answer would be accepted right now.
    pub fn is_presenting(&self) -> bool {
        !self.is_complete() && self.block.feedback == Feedback::None && self.transitions.is_idle()
    }

    /// Judge the current word and schedule the follow-up transition.
    pub fn answer(&mut self, judgment: &Judgment) -> Result<PendingTransition> {
        if !self.is_presenting() {
            return Err(DrillError::NotPresenting);
        }
        let word = self.block.current().ok_or(DrillError::NotPresenting)?;
        let pending = if judgment.verdict_for(word).is_correct() {
            self.block.feedback = Feedback::Correct;
            self.transitions
                .schedule(TransitionAction::Advance, CORRECT_ADVANCE_MS)
        } else {
            self.block.feedback = Feedback::Wrong;
            self.transitions
                .schedule(TransitionAction::RestartBlock, WRONG_RESET_MS)
        };
        debug!(action = ?pending.action, token = pending.token, "answer judged");
        Ok(pending)
    }

    /// The user opened the mistake matcher on the word they just missed.
    /// Holds the wrong feedback by cancelling the pending restart.
    pub fn open_mistake(&mut self) -> Result<Word> {
        if self.block.feedback != Feedback::Wrong {
            return Err(DrillError::NotPresenting);
        }
        let word = self.block.current().cloned().ok_or(DrillError::NotPresenting)?;
        self.transitions.cancel();
        Ok(word)
    }

    /// The matcher was closed: restart the block after the short delay.
    pub fn resolve_mistake(&mut self) -> Result<PendingTransition> {
        if self.block.feedback != Feedback::Wrong {
            return Err(DrillError::NotPresenting);
        }
        Ok(self
            .transitions
            .schedule(TransitionAction::RestartBlock, RESOLVED_RESET_MS))
    }

    /// Apply the transition identified by `token`. Stale tokens are ignored
    /// and return `false`.
    pub fn fire(&mut self, token: TransitionToken) -> bool {
        let Some(action) = self.transitions.take_if_current(token) else {
            return false;
        };
        match action {
            TransitionAction::Advance => self.next_in_block(),
            TransitionAction::RestartBlock => self.restart_block(),
            TransitionAction::RestartRun => return false,
        }
        true
    }

    pub fn cancel_pending(&mut self) -> Option<PendingTransition> {
        self.transitions.cancel()
    }

    /// Abandon the session. Nothing is persisted.
    pub fn quit(mut self) -> Option<PendingTransition> {
        self.transitions.cancel()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            word: self.current_word().cloned(),
            index: self.block.index,
            len: self.block.words.len(),
            current_index: self.current_index,
            total: self.queue.len(),
            feedback: self.block.feedback,
            block_phase: Some(self.block.phase),
            streak: None,
            attempt: None,
            wrong_word: None,
            pending: self.transitions.pending().copied(),
        }
    }

    fn load_block(&mut self, start: usize) {
        let end = (start + BLOCK_SIZE).min(self.queue.len());
        if start >= end {
            self.complete();
            return;
        }
        let words = shuffled(&self.queue.words()[start..end], &mut self.rng);
        debug!(start, len = words.len(), "block loaded");
        self.block = BlockState::new(words);
    }

    fn restart_block(&mut self) {
        let words = shuffled(&self.block.words, &mut self.rng);
        debug!(len = words.len(), "block restarted");
        self.block.words = words;
        self.block.index = 0;
        self.block.feedback = Feedback::None;
    }

    fn next_in_block(&mut self) {
        self.block.feedback = Feedback::None;
        if self.block.is_last() {
            self.next_phase();
        } else {
            self.block.index += 1;
        }
    }

    fn next_phase(&mut self) {
        if self.stage == Stage::Review {
            if self.current_index >= self.queue.len() {
                self.complete();
            } else {
                self.stage = Stage::Learning;
                self.load_block(self.current_index);
            }
            return;
        }

        let next_index = self.current_index + BLOCK_SIZE;
        if is_review_point(next_index, self.queue.len()) {
            self.start_review(next_index);
        } else {
            self.current_index = next_index;
            self.load_block(next_index);
        }
    }

    fn start_review(&mut self, next_index: usize) {
        let window = review_window(next_index, self.queue.len());
        debug!(start = window.start, end = window.end, "review started");
        let words = shuffled(&self.queue.words()[window], &mut self.rng);
        self.stage = Stage::Review;
        self.block = BlockState::new(words);
        self.current_index = next_index;
    }

    fn complete(&mut self) {
        debug!(total = self.queue.len(), "course complete");
        self.stage = Stage::Complete;
        self.block.feedback = Feedback::None;
        self.transitions.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Verdict;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn queue(n: i64) -> StudyQueue {
        let words = (1..=n)
            .map(|id| Word::new(id, format!("word{id}"), format!("意味{id}")))
            .collect();
        StudyQueue::from_words(words).unwrap()
    }

    fn session(n: i64) -> StudySession<StdRng> {
        StudySession::with_rng(queue(n), StdRng::seed_from_u64(42)).unwrap()
    }

    fn ids(words: &[Word]) -> Vec<i64> {
        let mut ids: Vec<i64> = words.iter().map(|w| w.id).collect();
        ids.sort_unstable();
        ids
    }

    fn judge(s: &mut StudySession<StdRng>, verdict: Verdict) {
        let pending = s.answer(&Judgment::SelfGraded(verdict)).unwrap();
        assert!(s.fire(pending.token));
    }

    /// Clear every word of the current block, returning the ids it held.
    fn clear_block(s: &mut StudySession<StdRng>) -> Vec<i64> {
        let block_ids = ids(&s.block().words);
        for _ in 0..block_ids.len() {
            judge(s, Verdict::Correct);
        }
        block_ids
    }

    #[test]
    fn first_block_holds_first_five_words() {
        let s = session(12);
        assert_eq!(s.phase(), SessionPhase::Learning);
        assert_eq!(ids(&s.block().words), vec![1, 2, 3, 4, 5]);
        assert_eq!(s.block().index, 0);
        assert_eq!(s.block().phase, BlockPhase::Meaning);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn blocks_partition_the_queue() {
        let mut s = session(23);
        let mut seen = Vec::new();
        while s.phase() == SessionPhase::Learning {
            seen.extend(clear_block(&mut s));
        }
        // final block ends at 23 which triggers the closing review
        assert_eq!(s.phase(), SessionPhase::Review);
        seen.sort_unstable();
        assert_eq!(seen, (1..=23).collect::<Vec<_>>());
        let unique: HashSet<i64> = seen.iter().copied().collect();
        assert_eq!(unique.len(), 23);
    }

    #[test]
    fn correct_answer_waits_for_advance() {
        let mut s = session(10);
        let pending = s.answer(&Judgment::SelfGraded(Verdict::Correct)).unwrap();
        assert_eq!(pending.action, TransitionAction::Advance);
        assert_eq!(pending.delay_ms, CORRECT_ADVANCE_MS);
        assert_eq!(s.block().feedback, Feedback::Correct);
        assert_eq!(s.block().index, 0);
        assert!(matches!(
            s.answer(&Judgment::SelfGraded(Verdict::Correct)),
            Err(DrillError::NotPresenting)
        ));

        assert!(s.fire(pending.token));
        assert_eq!(s.block().index, 1);
        assert_eq!(s.block().feedback, Feedback::None);
    }

    #[test]
    fn wrong_answer_restarts_block_without_advancing() {
        let mut s = session(10);
        judge(&mut s, Verdict::Correct);
        judge(&mut s, Verdict::Correct);
        assert_eq!(s.block().index, 2);
        let before = ids(&s.block().words);

        let pending = s.answer(&Judgment::SelfGraded(Verdict::Wrong)).unwrap();
        assert_eq!(pending.action, TransitionAction::RestartBlock);
        assert_eq!(pending.delay_ms, WRONG_RESET_MS);
        assert_eq!(s.block().feedback, Feedback::Wrong);

        assert!(s.fire(pending.token));
        assert_eq!(s.block().index, 0);
        assert_eq!(s.block().feedback, Feedback::None);
        assert_eq!(ids(&s.block().words), before);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn typed_answer_uses_substring_rule() {
        let mut s = session(5);
        let meaning = s.current_word().unwrap().meaning_jp.clone();
        let pending = s.answer(&Judgment::Typed(format!(" {meaning} "))).unwrap();
        assert_eq!(pending.action, TransitionAction::Advance);
        s.fire(pending.token);

        let pending = s.answer(&Judgment::Typed("違う".to_string())).unwrap();
        assert_eq!(pending.action, TransitionAction::RestartBlock);
    }

    #[test]
    fn mistake_matcher_holds_then_shortens_reset() {
        let mut s = session(10);
        let missed = s.current_word().unwrap().clone();
        let long = s.answer(&Judgment::SelfGraded(Verdict::Wrong)).unwrap();

        let opened = s.open_mistake().unwrap();
        assert_eq!(opened, missed);
        assert!(s.pending().is_none());
        assert!(!s.fire(long.token));
        assert_eq!(s.block().feedback, Feedback::Wrong);

        let short = s.resolve_mistake().unwrap();
        assert_eq!(short.delay_ms, RESOLVED_RESET_MS);
        assert!(s.fire(short.token));
        assert_eq!(s.block().index, 0);
        assert_eq!(s.block().feedback, Feedback::None);
    }

    #[test]
    fn newer_reset_supersedes_pending_one() {
        let mut s = session(10);
        let first = s.answer(&Judgment::SelfGraded(Verdict::Wrong)).unwrap();
        let second = s.resolve_mistake().unwrap();
        assert!(!s.fire(first.token));
        assert!(s.fire(second.token));
        assert!(!s.fire(second.token));
    }

    #[test]
    fn cancelled_reset_never_fires() {
        let mut s = session(10);
        let pending = s.answer(&Judgment::SelfGraded(Verdict::Wrong)).unwrap();
        assert_eq!(s.cancel_pending(), Some(pending));
        assert!(s.pending().is_none());

        assert!(!s.fire(pending.token));
        assert_eq!(s.block().feedback, Feedback::Wrong);
        assert!(matches!(
            s.answer(&Judgment::SelfGraded(Verdict::Correct)),
            Err(DrillError::NotPresenting)
        ));
        assert_eq!(s.cancel_pending(), None);
    }

    #[test]
    fn open_mistake_requires_wrong_feedback() {
        let mut s = session(10);
        assert!(s.open_mistake().is_err());
        assert!(s.resolve_mistake().is_err());
    }

    #[test]
    fn review_point_rule() {
        assert!(!is_review_point(5, 100));
        assert!(!is_review_point(20, 100));
        assert!(is_review_point(25, 100));
        assert!(is_review_point(50, 100));
        assert!(is_review_point(30, 30));
        assert!(is_review_point(35, 32));
        assert!(!is_review_point(0, 10));
    }

    #[test]
    fn review_window_is_last_25_clamped() {
        assert_eq!(review_window(25, 100), 0..25);
        assert_eq!(review_window(30, 30), 5..30);
        assert_eq!(review_window(10, 8), 0..8);
        assert_eq!(review_window(50, 48), 25..48);
    }

    #[test]
    fn thirty_word_course() {
        let mut s = session(30);

        for block in 0..5 {
            assert_eq!(s.phase(), SessionPhase::Learning);
            assert_eq!(s.current_index(), block * 5);
            clear_block(&mut s);
        }

        // 25 is a review boundary
        assert_eq!(s.phase(), SessionPhase::Review);
        assert_eq!(s.current_index(), 25);
        assert_eq!(ids(&s.block().words), (1..=25).collect::<Vec<_>>());
        clear_block(&mut s);

        assert_eq!(s.phase(), SessionPhase::Learning);
        assert_eq!(ids(&s.block().words), (26..=30).collect::<Vec<_>>());
        clear_block(&mut s);

        // end of queue: last 25 words
        assert_eq!(s.phase(), SessionPhase::Review);
        assert_eq!(s.current_index(), 30);
        assert_eq!(ids(&s.block().words), (6..=30).collect::<Vec<_>>());
        clear_block(&mut s);

        assert_eq!(
            s.phase(),
            SessionPhase::Complete {
                mode: CompletionMode::Learn
            }
        );
        assert!(s.current_word().is_none());
        assert!(matches!(
            s.answer(&Judgment::SelfGraded(Verdict::Correct)),
            Err(DrillError::NotPresenting)
        ));
    }

    #[test]
    fn short_queue_reviews_everything_then_completes() {
        let mut s = session(3);
        assert_eq!(ids(&s.block().words), vec![1, 2, 3]);
        clear_block(&mut s);
        assert_eq!(s.phase(), SessionPhase::Review);
        assert_eq!(ids(&s.block().words), vec![1, 2, 3]);
        clear_block(&mut s);
        assert!(s.is_complete());
    }

    #[test]
    fn wrong_answer_in_review_restarts_review() {
        let mut s = session(5);
        clear_block(&mut s);
        assert_eq!(s.phase(), SessionPhase::Review);
        judge(&mut s, Verdict::Correct);
        judge(&mut s, Verdict::Wrong);
        assert_eq!(s.phase(), SessionPhase::Review);
        assert_eq!(s.block().index, 0);
        assert_eq!(s.block().words.len(), 5);
        assert_eq!(s.current_index(), 5);
    }

    #[test]
    fn quit_cancels_pending() {
        let mut s = session(5);
        let pending = s.answer(&Judgment::SelfGraded(Verdict::Wrong)).unwrap();
        assert_eq!(s.quit(), Some(pending));
    }

    #[test]
    fn view_reports_progress() {
        let mut s = session(12);
        judge(&mut s, Verdict::Correct);
        let view = s.view();
        assert_eq!(view.phase, SessionPhase::Learning);
        assert_eq!(view.index, 1);
        assert_eq!(view.len, 5);
        assert_eq!(view.total, 12);
        assert_eq!(view.current_index, 0);
        assert_eq!(view.word.as_ref(), s.current_word());
        assert!(view.streak.is_none());
    }
}
