//! Study session endpoints

use axum::{extract::State, Json};
use drill_core::matcher::find_words;

use crate::error::Result;
use crate::models::*;
use crate::session::{arm, ActiveSession, Engine};
use crate::AppState;

/// POST /api/session
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>> {
    let deck = state.store.lock().await.get(&payload.deck_id)?.clone();

    let range = match (payload.start, payload.end) {
        (Some(start), Some(end)) => IdRange::new(start, end),
        _ => IdRange::suggested_for(&deck),
    };
    let queue = range.select(&deck)?;
    tracing::debug!(deck_id = %deck.id, start = range.start, end = range.end, words = queue.len(), "queue selected");
    let engine = Engine::start(payload.mode, queue)?;

    let mut hub = state.sessions.lock().await;
    let session = hub.replace(ActiveSession::new(
        deck.id,
        &deck.words,
        payload.input_method,
        engine,
    ));
    Ok(Json(SessionResponse::from(session)))
}

/// GET /api/session
pub async fn current(State(state): State<AppState>) -> Json<SessionResponse> {
    let hub = state.sessions.lock().await;
    Json(
        hub.active()
            .map(SessionResponse::from)
            .unwrap_or_else(SessionResponse::idle),
    )
}

/// POST /api/session/answer
pub async fn answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<SessionResponse>> {
    let judgment = payload.judgment()?;

    let mut hub = state.sessions.lock().await;
    let session = hub.session_mut(payload.session_id)?;
    let pending = session.engine.answer(&judgment)?;
    let response = SessionResponse::from(&*session);

    if let Some(pending) = pending {
        arm(&state.sessions, &mut hub, payload.session_id, pending);
    }
    Ok(Json(response))
}

/// POST /api/session/mistake
///
/// Holds the wrong-answer feedback on screen and searches the dictionary for
/// the word the user had in mind.
pub async fn mistake(
    State(state): State<AppState>,
    Json(payload): Json<MistakeRequest>,
) -> Result<Json<MistakeResponse>> {
    let mut hub = state.sessions.lock().await;
    let session = hub.session_mut(payload.session_id)?;
    let target = session.engine.open_mistake()?;
    let outcome = MatchOutcome::from(find_words(&payload.query, &session.dictionary));
    hub.cancel_timer();

    Ok(Json(MistakeResponse::new(target, outcome)))
}

/// POST /api/session/mistake/resolve
pub async fn resolve_mistake(
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<SessionResponse>> {
    let mut hub = state.sessions.lock().await;
    let session = hub.session_mut(payload.session_id)?;
    let pending = session.engine.resolve_mistake()?;
    let response = SessionResponse::from(&*session);

    match pending {
        Some(pending) => arm(&state.sessions, &mut hub, payload.session_id, pending),
        None => hub.cancel_timer(),
    }
    Ok(Json(response))
}

/// DELETE /api/session
pub async fn quit(State(state): State<AppState>) -> Json<QuitResponse> {
    let quit = state.sessions.lock().await.quit();
    Json(QuitResponse { quit })
}
