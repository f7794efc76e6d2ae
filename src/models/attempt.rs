use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed run through the quiz. Immutable once recorded; the attempt
/// log stores these most-recent-first. `missed_question_ids` may reference
/// questions that have since been deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub date: DateTime<Utc>,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub duration_seconds: u64,
    pub missed_question_ids: Vec<i64>,
}
