use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::question::QuizQuestion;

pub struct NewQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

pub struct QuestionPatch {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer_index: Option<usize>,
}

/// In-memory quiz-question store. Ids are `max(existing) + 1` and never
/// reused; update and delete on an absent id are no-ops.
#[derive(Clone, Default)]
pub struct QuestionService {
    store: Arc<RwLock<Vec<QuizQuestion>>>,
}

fn check_invariant(options: &[String], correct_answer_index: usize) -> Result<()> {
    if options.len() < 2 {
        return Err(Error::BadRequest(
            "A question needs at least two options".to_string(),
        ));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(Error::BadRequest("Options must not be empty".to_string()));
    }
    if correct_answer_index >= options.len() {
        return Err(Error::BadRequest(format!(
            "Correct answer index {} is out of range for {} options",
            correct_answer_index,
            options.len()
        )));
    }
    Ok(())
}

impl QuestionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, new: NewQuestion) -> Result<QuizQuestion> {
        if new.question.trim().is_empty() {
            return Err(Error::BadRequest(
                "Question text must not be empty".to_string(),
            ));
        }
        check_invariant(&new.options, new.correct_answer_index)?;

        let mut store = self.store.write().await;
        let next_id = store.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let question = QuizQuestion {
            id: next_id,
            question: new.question,
            options: new.options,
            correct_answer_index: new.correct_answer_index,
        };
        store.push(question.clone());
        Ok(question)
    }

    /// Partial merge. Returns `None` (without failing) when the id is absent.
    /// The merged record is validated before anything is written.
    pub async fn update(&self, id: i64, patch: QuestionPatch) -> Result<Option<QuizQuestion>> {
        let mut store = self.store.write().await;
        let Some(existing) = store.iter_mut().find(|q| q.id == id) else {
            return Ok(None);
        };

        let question = patch.question.unwrap_or_else(|| existing.question.clone());
        let options = patch.options.unwrap_or_else(|| existing.options.clone());
        let correct_answer_index = patch
            .correct_answer_index
            .unwrap_or(existing.correct_answer_index);

        if question.trim().is_empty() {
            return Err(Error::BadRequest(
                "Question text must not be empty".to_string(),
            ));
        }
        check_invariant(&options, correct_answer_index)?;

        existing.question = question;
        existing.options = options;
        existing.correct_answer_index = correct_answer_index;
        Ok(Some(existing.clone()))
    }

    /// Returns whether a record was removed; absent ids are a no-op.
    pub async fn delete(&self, id: i64) -> bool {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|q| q.id != id);
        store.len() < before
    }

    pub async fn list(&self) -> Vec<QuizQuestion> {
        self.store.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<QuizQuestion> {
        self.store.read().await.iter().find(|q| q.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
