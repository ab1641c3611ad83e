//! The single active study session and its transition timer.

use std::sync::Arc;

use drill_core::matcher::dictionary_for;
use drill_core::speech::SpeechCue;
use drill_core::{
    Feedback, InputMethod, Judgment, PendingTransition, PerfectStreakRun, RunStep, SessionView,
    StudyMode, StudyQueue, StudySession, TransitionToken, Word,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::timers::TransitionTimer;

/// Hub shared between request handlers and timer tasks.
pub type SharedHub = Arc<Mutex<SessionHub>>;

/// Learn or test engine behind a session.
pub enum Engine {
    Learn(StudySession),
    Test(PerfectStreakRun),
}

impl Engine {
    pub fn start(mode: StudyMode, queue: StudyQueue) -> drill_core::Result<Self> {
        Ok(match mode {
            StudyMode::Learn => Self::Learn(StudySession::new(queue)?),
            StudyMode::Test => Self::Test(PerfectStreakRun::new(queue)?),
        })
    }

    pub fn mode(&self) -> StudyMode {
        match self {
            Self::Learn(_) => StudyMode::Learn,
            Self::Test(_) => StudyMode::Test,
        }
    }

    /// Judge the current word. Returns the transition to schedule, if any.
    pub fn answer(&mut self, judgment: &Judgment) -> drill_core::Result<Option<PendingTransition>> {
        match self {
            Self::Learn(session) => session.answer(judgment).map(Some),
            Self::Test(run) => Ok(match run.answer(judgment)? {
                RunStep::Restart(pending) => Some(pending),
                RunStep::Next | RunStep::Won => None,
            }),
        }
    }

    pub fn open_mistake(&mut self) -> drill_core::Result<Word> {
        match self {
            Self::Learn(session) => session.open_mistake(),
            Self::Test(run) => run.open_mistake(),
        }
    }

    pub fn resolve_mistake(&mut self) -> drill_core::Result<Option<PendingTransition>> {
        match self {
            Self::Learn(session) => session.resolve_mistake().map(Some),
            Self::Test(run) => run.resolve_mistake().map(|()| None),
        }
    }

    pub fn fire(&mut self, token: TransitionToken) -> bool {
        match self {
            Self::Learn(session) => session.fire(token),
            Self::Test(run) => run.fire(token),
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            Self::Learn(session) => session.view(),
            Self::Test(run) => run.view(),
        }
    }

    fn quit(self) -> Option<PendingTransition> {
        match self {
            Self::Learn(session) => session.quit(),
            Self::Test(run) => run.quit(),
        }
    }
}

pub struct ActiveSession {
    pub id: Uuid,
    pub deck_id: String,
    pub input_method: InputMethod,
    /// Deck words plus the confusable list, searched by the mistake matcher.
    pub dictionary: Vec<Word>,
    pub engine: Engine,
}

impl ActiveSession {
    pub fn new(deck_id: String, deck_words: &[Word], input_method: InputMethod, engine: Engine) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            input_method,
            dictionary: dictionary_for(deck_words),
            engine,
        }
    }

    /// Pronunciation cue for the word currently asked, if one is up.
    pub fn speech_cue(&self) -> Option<SpeechCue> {
        let view = self.engine.view();
        match (view.word, view.feedback) {
            (Some(word), Feedback::None) => Some(SpeechCue::english(word.spelling)),
            _ => None,
        }
    }
}

/// Owner of the one session that may be running at a time.
#[derive(Default)]
pub struct SessionHub {
    active: Option<ActiveSession>,
    timer: TransitionTimer,
}

impl SessionHub {
    pub fn shared() -> SharedHub {
        Arc::new(Mutex::new(Self::default()))
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Install `session`, quitting whatever was running before.
    pub fn replace(&mut self, session: ActiveSession) -> &ActiveSession {
        self.quit();
        tracing::info!(
            session_id = %session.id,
            deck_id = %session.deck_id,
            mode = ?session.engine.mode(),
            "session started"
        );
        self.active.insert(session)
    }

    /// Drop the active session and its timer. Returns the id that was quit.
    pub fn quit(&mut self) -> Option<Uuid> {
        self.timer.cancel();
        let session = self.active.take()?;
        let id = session.id;
        if let Some(pending) = session.engine.quit() {
            tracing::debug!(session_id = %id, token = pending.token, "pending transition dropped");
        }
        tracing::info!(session_id = %id, "session quit");
        Some(id)
    }

    /// The active session, provided `id` still names it.
    pub fn session_mut(&mut self, id: Uuid) -> Result<&mut ActiveSession> {
        match self.active.as_mut() {
            Some(session) if session.id == id => Ok(session),
            _ => Err(ApiError::Conflict(format!("stale session {id}"))),
        }
    }

    pub fn cancel_timer(&mut self) {
        self.timer.cancel();
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Apply a fired transition if `session_id` is still the active session.
    pub fn fire(&mut self, session_id: Uuid, token: TransitionToken) -> bool {
        match self.active.as_mut() {
            Some(session) if session.id == session_id => {
                let applied = session.engine.fire(token);
                tracing::debug!(%session_id, token, applied, "transition fired");
                applied
            }
            _ => false,
        }
    }
}

/// Spawn the task that fires `pending` once its delay elapses.
///
/// The caller holds the hub lock, so the guard is passed in and the task
/// handle is stored before the lock is released.
pub fn arm(hub: &SharedHub, guard: &mut SessionHub, session_id: Uuid, pending: PendingTransition) {
    let shared = Arc::clone(hub);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(pending.delay()).await;
        shared.lock().await.fire(session_id, pending.token);
    });
    guard.timer.arm(handle);
}
