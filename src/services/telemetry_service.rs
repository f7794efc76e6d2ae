use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::models::interaction::FlashcardInteraction;

const CHANNEL_CAPACITY: usize = 1024;

/// Best-effort sink for flashcard interaction events. `dispatch` never blocks
/// and never fails the caller: a full or closed channel is logged and the
/// event is dropped. A background task drains the channel into the in-memory
/// interaction log.
#[derive(Clone)]
pub struct TelemetryService {
    store: Arc<RwLock<Vec<FlashcardInteraction>>>,
    tx: mpsc::Sender<FlashcardInteraction>,
}

impl TelemetryService {
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::channel::<FlashcardInteraction>(CHANNEL_CAPACITY);
        let store: Arc<RwLock<Vec<FlashcardInteraction>>> = Arc::new(RwLock::new(Vec::new()));

        let sink = store.clone();
        tokio::spawn(async move {
            while let Some(interaction) = rx.recv().await {
                sink.write().await.push(interaction);
            }
        });

        Self { store, tx }
    }

    pub fn dispatch(&self, interaction: FlashcardInteraction) {
        if let Err(e) = self.tx.try_send(interaction) {
            tracing::warn!(error = ?e, "Dropping flashcard interaction event");
        }
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn list(&self) -> Vec<FlashcardInteraction> {
        self.store.read().await.clone()
    }
}
