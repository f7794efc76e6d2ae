use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::attempt::QuizAttempt;

/// Append-only log of completed quiz attempts, most recent first. Insertion
/// order is the recency order; nothing re-sorts by date, so backfilling old
/// attempts would break `recent`.
#[derive(Clone, Default)]
pub struct AttemptService {
    log: Arc<RwLock<Vec<QuizAttempt>>>,
}

pub struct NewAttempt {
    pub user_id: i64,
    pub user_name: String,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub duration_seconds: u64,
    pub missed_question_ids: Vec<i64>,
}

impl AttemptService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, new: NewAttempt) -> Result<QuizAttempt> {
        if new.user_name.trim().is_empty() {
            return Err(Error::BadRequest("User name must not be empty".to_string()));
        }

        let mut log = self.log.write().await;
        let next_id = log.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let attempt = QuizAttempt {
            id: next_id,
            user_id: new.user_id,
            user_name: new.user_name,
            date: Utc::now(),
            correct_answers: new.correct_answers,
            wrong_answers: new.wrong_answers,
            duration_seconds: new.duration_seconds,
            missed_question_ids: new.missed_question_ids,
        };
        log.insert(0, attempt.clone());
        Ok(attempt)
    }

    pub async fn list(&self) -> Vec<QuizAttempt> {
        self.log.read().await.clone()
    }

    pub async fn recent(&self, n: usize) -> Vec<QuizAttempt> {
        let log = self.log.read().await;
        log.iter().take(n).cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.log.read().await.len()
    }
}
