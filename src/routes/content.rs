use axum::{extract::State, response::Json};

use crate::models::flashcard::Flashcard;
use crate::models::question::QuizQuestion;
use crate::AppState;

/// Full question records, correct indices included — kept for clients that
/// grade locally, matching the legacy wire shape.
#[axum::debug_handler]
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<QuizQuestion>> {
    Json(state.question_service.list().await)
}

#[axum::debug_handler]
pub async fn list_flashcards(State(state): State<AppState>) -> Json<Vec<Flashcard>> {
    Json(state.flashcard_service.list().await)
}
