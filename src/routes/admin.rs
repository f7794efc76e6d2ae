use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use validator::Validate;

use crate::dto::admin_dto::{
    CreateFlashcardPayload, CreateQuestionPayload, UpdateFlashcardPayload, UpdateQuestionPayload,
};
use crate::dto::stats_dto::{DashboardStats, OverviewStats};
use crate::models::attempt::QuizAttempt;
use crate::models::flashcard::Flashcard;
use crate::models::question::QuizQuestion;
use crate::services::flashcard_service::{FlashcardPatch, NewFlashcard};
use crate::services::question_service::{NewQuestion, QuestionPatch};
use crate::AppState;

#[axum::debug_handler]
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<QuizQuestion>> {
    Json(state.question_service.list().await)
}

#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Json(req): Json<CreateQuestionPayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let question = state
        .question_service
        .create(NewQuestion {
            question: req.question,
            options: req.options,
            correct_answer_index: req.correct_answer_index,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(question)).into_response())
}

#[axum::debug_handler]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateQuestionPayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let updated = state
        .question_service
        .update(
            id,
            QuestionPatch {
                question: req.question,
                options: req.options,
                correct_answer_index: req.correct_answer_index,
            },
        )
        .await?;
    Ok(match updated {
        Some(question) => Json(question).into_response(),
        None => (StatusCode::OK, Json(json!({ "updated": false }))).into_response(),
    })
}

#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.question_service.delete(id).await;
    StatusCode::NO_CONTENT
}

#[axum::debug_handler]
pub async fn list_flashcards(State(state): State<AppState>) -> Json<Vec<Flashcard>> {
    Json(state.flashcard_service.list().await)
}

#[axum::debug_handler]
pub async fn create_flashcard(
    State(state): State<AppState>,
    Json(req): Json<CreateFlashcardPayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let card = state
        .flashcard_service
        .create(NewFlashcard {
            question: req.question,
            answer: req.answer,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(card)).into_response())
}

#[axum::debug_handler]
pub async fn update_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFlashcardPayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let updated = state
        .flashcard_service
        .update(
            id,
            FlashcardPatch {
                question: req.question,
                answer: req.answer,
            },
        )
        .await?;
    Ok(match updated {
        Some(card) => Json(card).into_response(),
        None => (StatusCode::OK, Json(json!({ "updated": false }))).into_response(),
    })
}

#[axum::debug_handler]
pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.flashcard_service.delete(id).await;
    StatusCode::NO_CONTENT
}

#[axum::debug_handler]
pub async fn list_attempts(State(state): State<AppState>) -> Json<Vec<QuizAttempt>> {
    Json(state.attempt_service.list().await)
}

#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.stats_service.dashboard().await)
}

#[axum::debug_handler]
pub async fn overview_stats(State(state): State<AppState>) -> Json<OverviewStats> {
    Json(state.stats_service.overview().await)
}
