use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::dto::flashcard_dto::{FlashcardSessionView, StartFlashcardSessionRequest};
use crate::models::interaction::FlashcardInteraction;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartFlashcardSessionRequest>,
) -> crate::error::Result<Response> {
    let cards = state.flashcard_service.list().await;
    let (token, snap) = state.flashcard_sessions.start(cards, req.user_id).await?;
    tracing::info!(token = %token, "Flashcard session started");
    let view = FlashcardSessionView::from_snapshot(Some(token), snap);
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<FlashcardSessionView>> {
    let snap = state.flashcard_sessions.get(&token).await?;
    Ok(Json(FlashcardSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn next_card(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<FlashcardSessionView>> {
    let snap = state.flashcard_sessions.next(&token).await?;
    Ok(Json(FlashcardSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn prev_card(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<FlashcardSessionView>> {
    let snap = state.flashcard_sessions.prev(&token).await?;
    Ok(Json(FlashcardSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn toggle_reveal(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<FlashcardSessionView>> {
    let snap = state.flashcard_sessions.toggle_reveal(&token).await?;
    Ok(Json(FlashcardSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn shuffle(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<FlashcardSessionView>> {
    let snap = state.flashcard_sessions.shuffle(&token).await?;
    Ok(Json(FlashcardSessionView::from_snapshot(None, snap)))
}

/// Direct telemetry sink for clients that track flashcards locally.
/// Accepted means enqueued; the caller never waits on the log write.
#[axum::debug_handler]
pub async fn log_interaction(
    State(state): State<AppState>,
    Json(interaction): Json<FlashcardInteraction>,
) -> impl IntoResponse {
    state.telemetry_service.dispatch(interaction);
    StatusCode::ACCEPTED
}
