use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::QuizQuestion;
use crate::services::quiz_session::QuizSessionSnapshot;
use crate::services::scoring_service::QuizResults;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizSessionRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// A question as shown to a quiz taker: no correct-answer index on the wire,
/// the session grades server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
}

impl From<QuizQuestion> for QuestionView {
    fn from(q: QuizQuestion) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: q.options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSessionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    pub total_questions: usize,
    pub answered_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    pub elapsed_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<QuizResults>,
}

impl QuizSessionView {
    pub fn from_snapshot(token: Option<String>, snap: QuizSessionSnapshot) -> Self {
        Self {
            token,
            finished: snap.finished,
            current_index: snap.current_index,
            total_questions: snap.total_questions,
            answered_count: snap.answered_count,
            selected_option_index: snap.selected_option,
            question: snap.question.map(QuestionView::from),
            elapsed_seconds: snap.elapsed_seconds,
            results: snap.results,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAnswerRequest {
    pub option_index: usize,
}

/// Legacy submission shape for clients that ran the quiz locally and report
/// only the summary.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub duration_seconds: u64,
    #[serde(default)]
    pub missed_question_ids: Vec<i64>,
}
