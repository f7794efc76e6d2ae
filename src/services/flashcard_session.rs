use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::flashcard::Flashcard;
use crate::models::interaction::{FlashcardInteraction, InteractionAction};
use crate::services::telemetry_service::TelemetryService;
use crate::utils::token::generate_session_token;

/// Transient state of one flashcard run: a clamped pointer over an ordered
/// card snapshot plus an answer-visibility flag. Navigation at either edge is
/// a no-op; there is no wraparound.
pub struct FlashcardSession {
    user_id: Option<i64>,
    cards: Vec<Flashcard>,
    index: usize,
    revealed: bool,
    card_shown_at: Instant,
    last_activity: Instant,
}

impl FlashcardSession {
    pub fn new(cards: Vec<Flashcard>, user_id: Option<i64>) -> Self {
        let now = Instant::now();
        Self {
            user_id,
            cards,
            index: 0,
            revealed: false,
            card_shown_at: now,
            last_activity: now,
        }
    }

    pub fn current_card(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn interaction(&self, action: InteractionAction) -> Option<FlashcardInteraction> {
        let user_id = self.user_id?;
        Some(FlashcardInteraction {
            user_id,
            card_id: self.current_card().id,
            action,
            duration: self.card_shown_at.elapsed().as_secs(),
        })
    }

    fn leave_card(&mut self, events: &mut Vec<FlashcardInteraction>) {
        events.extend(self.interaction(InteractionAction::View));
        self.revealed = false;
        self.card_shown_at = Instant::now();
    }

    /// Moves to the following card, clamped at the last one. Leaving a card
    /// logs a `view` event and hides the answer again.
    pub fn next(&mut self) -> Vec<FlashcardInteraction> {
        let mut events = Vec::new();
        if self.index + 1 < self.cards.len() {
            self.leave_card(&mut events);
            self.index += 1;
        }
        self.touch();
        events
    }

    /// Moves to the previous card, clamped at the first one.
    pub fn prev(&mut self) -> Vec<FlashcardInteraction> {
        let mut events = Vec::new();
        if self.index > 0 {
            self.leave_card(&mut events);
            self.index -= 1;
        }
        self.touch();
        events
    }

    /// Flips answer visibility. Only the hidden-to-visible flip counts as a
    /// `reveal` interaction.
    pub fn toggle_reveal(&mut self) -> Vec<FlashcardInteraction> {
        self.revealed = !self.revealed;
        self.touch();
        if self.revealed {
            self.interaction(InteractionAction::Reveal).into_iter().collect()
        } else {
            Vec::new()
        }
    }

    /// Fisher–Yates shuffle over the card snapshot; pointer back to the
    /// start, answer hidden.
    pub fn shuffle(&mut self) -> Vec<FlashcardInteraction> {
        let mut events = Vec::new();
        self.leave_card(&mut events);

        let mut rng = rand::thread_rng();
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
        self.index = 0;
        events.extend(self.interaction(InteractionAction::Shuffle));
        self.touch();
        events
    }

    #[cfg(test)]
    pub fn card_ids(&self) -> Vec<i64> {
        self.cards.iter().map(|c| c.id).collect()
    }
}

pub struct FlashcardSessionSnapshot {
    pub current_index: usize,
    pub total_cards: usize,
    pub revealed: bool,
    pub card: Flashcard,
}

fn snapshot(session: &FlashcardSession) -> FlashcardSessionSnapshot {
    FlashcardSessionSnapshot {
        current_index: session.index(),
        total_cards: session.total_cards(),
        revealed: session.revealed(),
        card: session.current_card().clone(),
    }
}

/// Token-addressed registry of live flashcard sessions. Every operation
/// dispatches its interaction events to the telemetry sink; a telemetry
/// failure never disturbs navigation.
#[derive(Clone)]
pub struct FlashcardSessionService {
    sessions: Arc<RwLock<HashMap<String, FlashcardSession>>>,
    telemetry: TelemetryService,
}

impl FlashcardSessionService {
    pub fn new(telemetry: TelemetryService) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            telemetry,
        }
    }

    pub async fn start(
        &self,
        cards: Vec<Flashcard>,
        user_id: Option<i64>,
    ) -> Result<(String, FlashcardSessionSnapshot)> {
        if cards.is_empty() {
            return Err(Error::BadRequest("No flashcards are available".to_string()));
        }
        let token = generate_session_token();
        let session = FlashcardSession::new(cards, user_id);
        let snap = snapshot(&session);
        self.sessions.write().await.insert(token.clone(), session);
        Ok((token, snap))
    }

    pub async fn get(&self, token: &str) -> Result<FlashcardSessionSnapshot> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(token)
            .ok_or_else(|| Error::NotFound("Unknown flashcard session".to_string()))?;
        Ok(snapshot(session))
    }

    async fn mutate<F>(&self, token: &str, op: F) -> Result<FlashcardSessionSnapshot>
    where
        F: FnOnce(&mut FlashcardSession) -> Vec<FlashcardInteraction>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| Error::NotFound("Unknown flashcard session".to_string()))?;
        let events = op(session);
        let snap = snapshot(session);
        drop(sessions);
        for event in events {
            self.telemetry.dispatch(event);
        }
        Ok(snap)
    }

    pub async fn next(&self, token: &str) -> Result<FlashcardSessionSnapshot> {
        self.mutate(token, |s| s.next()).await
    }

    pub async fn prev(&self, token: &str) -> Result<FlashcardSessionSnapshot> {
        self.mutate(token, |s| s.prev()).await
    }

    pub async fn toggle_reveal(&self, token: &str) -> Result<FlashcardSessionSnapshot> {
        self.mutate(token, |s| s.toggle_reveal()).await
    }

    pub async fn shuffle(&self, token: &str) -> Result<FlashcardSessionSnapshot> {
        self.mutate(token, |s| s.shuffle()).await
    }

    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for() < ttl);
        before - sessions.len()
    }
}
