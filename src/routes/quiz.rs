use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::quiz_dto::{
    QuizSessionView, SelectAnswerRequest, StartQuizSessionRequest, SubmitAttemptRequest,
};
use crate::services::attempt_service::NewAttempt;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartQuizSessionRequest>,
) -> crate::error::Result<Response> {
    let questions = state.question_service.list().await;
    let (token, snap) = state
        .quiz_sessions
        .start(questions, req.user_id, req.user_name)
        .await?;
    tracing::info!(token = %token, "Quiz session started");
    let view = QuizSessionView::from_snapshot(Some(token), snap);
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<QuizSessionView>> {
    let snap = state.quiz_sessions.get(&token).await?;
    Ok(Json(QuizSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn select_answer(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SelectAnswerRequest>,
) -> crate::error::Result<Json<QuizSessionView>> {
    let snap = state
        .quiz_sessions
        .select_answer(&token, req.option_index)
        .await?;
    Ok(Json(QuizSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn advance(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<QuizSessionView>> {
    let snap = state.quiz_sessions.advance(&token).await?;
    if snap.finished {
        tracing::info!(token = %token, "Quiz session finished");
    }
    Ok(Json(QuizSessionView::from_snapshot(None, snap)))
}

#[axum::debug_handler]
pub async fn go_back(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Json<QuizSessionView>> {
    let snap = state.quiz_sessions.go_back(&token).await?;
    Ok(Json(QuizSessionView::from_snapshot(None, snap)))
}

/// Legacy sink for attempts graded on the client. The summary lands in the
/// same log the session flow feeds.
#[axum::debug_handler]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Json(req): Json<SubmitAttemptRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let attempt = state
        .attempt_service
        .record(NewAttempt {
            user_id: req.user_id.unwrap_or(1),
            user_name: req.user_name.unwrap_or_else(|| "Guest".to_string()),
            correct_answers: req.correct_answers,
            wrong_answers: req.wrong_answers,
            duration_seconds: req.duration_seconds,
            missed_question_ids: req.missed_question_ids,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(attempt)).into_response())
}
