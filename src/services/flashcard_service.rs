use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::flashcard::Flashcard;

pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
}

pub struct FlashcardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// In-memory flashcard store with the same id and no-op rules as the
/// question store.
#[derive(Clone, Default)]
pub struct FlashcardService {
    store: Arc<RwLock<Vec<Flashcard>>>,
}

impl FlashcardService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, new: NewFlashcard) -> Result<Flashcard> {
        if new.question.trim().is_empty() || new.answer.trim().is_empty() {
            return Err(Error::BadRequest(
                "Flashcard question and answer must not be empty".to_string(),
            ));
        }

        let mut store = self.store.write().await;
        let next_id = store.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let card = Flashcard {
            id: next_id,
            question: new.question,
            answer: new.answer,
        };
        store.push(card.clone());
        Ok(card)
    }

    pub async fn update(&self, id: i64, patch: FlashcardPatch) -> Result<Option<Flashcard>> {
        let mut store = self.store.write().await;
        let Some(existing) = store.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        let question = patch.question.unwrap_or_else(|| existing.question.clone());
        let answer = patch.answer.unwrap_or_else(|| existing.answer.clone());
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(Error::BadRequest(
                "Flashcard question and answer must not be empty".to_string(),
            ));
        }

        existing.question = question;
        existing.answer = answer;
        Ok(Some(existing.clone()))
    }

    pub async fn delete(&self, id: i64) -> bool {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|c| c.id != id);
        store.len() < before
    }

    pub async fn list(&self) -> Vec<Flashcard> {
        self.store.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_update_delete_flow() {
        let service = FlashcardService::new();
        let card = service
            .create(NewFlashcard {
                question: "What is ownership?".into(),
                answer: "A set of move semantics rules".into(),
            })
            .await
            .unwrap();
        assert_eq!(card.id, 1);

        let updated = service
            .update(
                card.id,
                FlashcardPatch {
                    question: None,
                    answer: Some("Compile-time resource management".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.question, "What is ownership?");
        assert_eq!(updated.answer, "Compile-time resource management");

        assert!(service
            .update(99, FlashcardPatch { question: None, answer: None })
            .await
            .unwrap()
            .is_none());

        assert!(service.delete(card.id).await);
        assert!(!service.delete(card.id).await);
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let service = FlashcardService::new();
        assert!(service
            .create(NewFlashcard {
                question: "".into(),
                answer: "a".into(),
            })
            .await
            .is_err());
        assert!(service
            .create(NewFlashcard {
                question: "q".into(),
                answer: "   ".into(),
            })
            .await
            .is_err());
    }
}
