use serde::Serialize;

use crate::models::attempt::QuizAttempt;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedQuestionStat {
    pub question_id: i64,
    pub label: String,
    pub missed: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_attempts: u64,
    pub average_score: f64,
    pub total_questions: u64,
    pub total_flashcards: u64,
    pub most_missed: Vec<MissedQuestionStat>,
    pub recent_attempts: Vec<QuizAttempt>,
}

/// Count summary kept wire-compatible with the legacy `/api/stats/overview`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_users: u64,
    pub total_questions: u64,
    pub total_flashcards: u64,
    pub total_quiz_attempts: u64,
    pub total_flashcard_views: u64,
}
