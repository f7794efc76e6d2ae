use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Reveal,
    View,
    Shuffle,
}

/// Write-only flashcard telemetry. Logging is best-effort; nothing in the
/// session flow depends on these records existing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardInteraction {
    pub user_id: i64,
    pub card_id: i64,
    pub action: InteractionAction,
    pub duration: u64,
}
