//! Deck endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use drill_core::import::{export_deck, export_file_name, parse_import, validate_words};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Json<DeckListResponse> {
    let store = state.store.lock().await;
    Json(DeckListResponse {
        decks: store.list().to_vec(),
    })
}

/// POST /api/decks
pub async fn create(State(state): State<AppState>) -> Json<Deck> {
    Json(state.store.lock().await.create())
}

/// GET /api/decks/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Deck>> {
    let store = state.store.lock().await;
    Ok(Json(store.get(&id)?.clone()))
}

/// PUT /api/decks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(deck): Json<Deck>,
) -> Result<Json<Deck>> {
    if deck.id != id {
        return Err(ApiError::BadRequest(format!(
            "deck id {} does not match path {id}",
            deck.id
        )));
    }
    validate_words(&deck.words)?;
    state.store.lock().await.save(deck.clone())?;
    Ok(Json(deck))
}

/// DELETE /api/decks/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeckListResponse>> {
    let mut store = state.store.lock().await;
    store.delete(&id)?;
    Ok(Json(DeckListResponse {
        decks: store.list().to_vec(),
    }))
}

/// DELETE /api/decks/:id/words/:word_id
pub async fn delete_word(
    State(state): State<AppState>,
    Path((id, word_id)): Path<(String, i64)>,
) -> Result<Json<Deck>> {
    let deck = state.store.lock().await.delete_word(&id, word_id)?;
    Ok(Json(deck))
}

/// POST /api/decks/:id/import
///
/// The body is the raw JSON being imported: either an array of words or a
/// deck object.
pub async fn import(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let payload = parse_import(&body)?;
    let imported = payload.word_count();

    let mut store = state.store.lock().await;
    let deck = payload.apply(store.get(&id)?);
    store.save(deck.clone())?;
    tracing::info!(deck_id = %id, imported, "words imported");

    Ok(Json(ImportResponse { imported, deck }))
}

/// GET /api/decks/:id/export
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let store = state.store.lock().await;
    let deck = store.get(&id)?;
    let body = export_deck(deck)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&deck.title)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// GET /api/decks/:id/range
pub async fn range(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<RangeResponse>> {
    let store = state.store.lock().await;
    let deck = store.get(&id)?;
    let suggested = IdRange::suggested_for(deck);
    let range = IdRange::new(
        query.start.unwrap_or(suggested.start),
        query.end.unwrap_or(suggested.end),
    );
    let selected = deck.words.iter().filter(|w| range.contains(w.id)).count();

    Ok(Json(RangeResponse {
        start: range.start,
        end: range.end,
        bounds: deck.id_bounds(),
        selected,
    }))
}
