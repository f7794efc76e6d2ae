use serde::{Deserialize, Serialize};

use crate::services::flashcard_session::FlashcardSessionSnapshot;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartFlashcardSessionRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// The answer side only goes on the wire once it has been revealed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: i64,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSessionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub current_index: usize,
    pub total_cards: usize,
    pub revealed: bool,
    pub card: CardView,
}

impl FlashcardSessionView {
    pub fn from_snapshot(token: Option<String>, snap: FlashcardSessionSnapshot) -> Self {
        let answer = snap.revealed.then_some(snap.card.answer);
        Self {
            token,
            current_index: snap.current_index,
            total_cards: snap.total_cards,
            revealed: snap.revealed,
            card: CardView {
                id: snap.card.id,
                question: snap.card.question,
                answer,
            },
        }
    }
}
