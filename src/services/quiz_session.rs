use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::question::QuizQuestion;
use crate::services::attempt_service::{AttemptService, NewAttempt};
use crate::services::scoring_service::{QuizResults, ScoringService};
use crate::utils::token::generate_session_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress(usize),
    Finished,
}

/// Transient state of one quiz run. Owns a snapshot of the question list, so
/// admin edits made mid-run do not shift indices under the taker.
pub struct QuizSession {
    user_id: Option<i64>,
    user_name: Option<String>,
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    state: SessionState,
    started_at: Instant,
    last_activity: Instant,
    duration_seconds: Option<u64>,
    results: Option<QuizResults>,
}

pub enum AdvanceOutcome {
    Moved(usize),
    Finished(QuizResults),
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>, user_id: Option<i64>, user_name: Option<String>) -> Self {
        let now = Instant::now();
        let answers = vec![None; questions.len()];
        Self {
            user_id,
            user_name,
            questions,
            answers,
            state: SessionState::InProgress(0),
            started_at: now,
            last_activity: now,
            duration_seconds: None,
            results: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress(idx) => Some(idx),
            SessionState::Finished => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|idx| self.questions.get(idx))
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.current_index()
            .and_then(|idx| self.answers.get(idx).copied().flatten())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn results(&self) -> Option<&QuizResults> {
        self.results.as_ref()
    }

    /// Seconds since the session started, frozen at the moment it finished.
    pub fn elapsed_seconds(&self) -> u64 {
        self.duration_seconds
            .unwrap_or_else(|| self.started_at.elapsed().as_secs())
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Records (or overwrites) the answer for the current question. Does not
    /// advance. Repeating the same selection is harmless.
    pub fn select_answer(&mut self, option_index: usize) -> Result<()> {
        let SessionState::InProgress(idx) = self.state else {
            return Err(Error::BadRequest("Quiz is already finished".to_string()));
        };
        let Some(question) = self.questions.get(idx) else {
            return Err(Error::BadRequest("Quiz has no questions".to_string()));
        };
        if !question.answer_in_bounds(option_index) {
            return Err(Error::BadRequest(format!(
                "Option index {} is out of range for question {}",
                option_index, question.id
            )));
        }
        self.answers[idx] = Some(option_index);
        self.touch();
        Ok(())
    }

    /// Moves to the next question, or finishes the quiz from the last one.
    /// The current question must be answered first; the finish transition
    /// happens exactly once and freezes the elapsed time.
    pub fn advance(&mut self) -> Result<AdvanceOutcome> {
        let SessionState::InProgress(idx) = self.state else {
            return Err(Error::BadRequest("Quiz is already finished".to_string()));
        };
        if self.answers.get(idx).copied().flatten().is_none() {
            return Err(Error::BadRequest(
                "Select an answer before moving on".to_string(),
            ));
        }
        self.touch();
        if idx + 1 < self.questions.len() {
            self.state = SessionState::InProgress(idx + 1);
            return Ok(AdvanceOutcome::Moved(idx + 1));
        }

        let results = ScoringService::score(&self.questions, &self.answers);
        self.duration_seconds = Some(self.started_at.elapsed().as_secs());
        self.state = SessionState::Finished;
        self.results = Some(results.clone());
        Ok(AdvanceOutcome::Finished(results))
    }

    /// Steps back one question. No-op at the first question; recorded answers
    /// are left untouched.
    pub fn go_back(&mut self) -> Result<usize> {
        let SessionState::InProgress(idx) = self.state else {
            return Err(Error::BadRequest("Quiz is already finished".to_string()));
        };
        let new_idx = idx.saturating_sub(1);
        self.state = SessionState::InProgress(new_idx);
        self.touch();
        Ok(new_idx)
    }
}

/// Plain-data view of a session, handed to the DTO layer so locks never leak
/// out of the service.
pub struct QuizSessionSnapshot {
    pub finished: bool,
    pub current_index: Option<usize>,
    pub total_questions: usize,
    pub answered_count: usize,
    pub selected_option: Option<usize>,
    pub question: Option<QuizQuestion>,
    pub elapsed_seconds: u64,
    pub results: Option<QuizResults>,
}

fn snapshot(session: &QuizSession) -> QuizSessionSnapshot {
    QuizSessionSnapshot {
        finished: session.state() == SessionState::Finished,
        current_index: session.current_index(),
        total_questions: session.total_questions(),
        answered_count: session.answered_count(),
        selected_option: session.selected_option(),
        question: session.current_question().cloned(),
        elapsed_seconds: session.elapsed_seconds(),
        results: session.results().cloned(),
    }
}

/// Token-addressed registry of live quiz sessions. Finishing a session hands
/// exactly one attempt record to the attempt log.
#[derive(Clone)]
pub struct QuizSessionService {
    sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
    attempts: AttemptService,
}

impl QuizSessionService {
    pub fn new(attempts: AttemptService) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            attempts,
        }
    }

    pub async fn start(
        &self,
        questions: Vec<QuizQuestion>,
        user_id: Option<i64>,
        user_name: Option<String>,
    ) -> Result<(String, QuizSessionSnapshot)> {
        if questions.is_empty() {
            return Err(Error::BadRequest(
                "No quiz questions are available".to_string(),
            ));
        }
        let token = generate_session_token();
        let session = QuizSession::new(questions, user_id, user_name);
        let snap = snapshot(&session);
        self.sessions.write().await.insert(token.clone(), session);
        Ok((token, snap))
    }

    pub async fn get(&self, token: &str) -> Result<QuizSessionSnapshot> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(token)
            .ok_or_else(|| Error::NotFound("Unknown quiz session".to_string()))?;
        Ok(snapshot(session))
    }

    pub async fn select_answer(&self, token: &str, option_index: usize) -> Result<QuizSessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| Error::NotFound("Unknown quiz session".to_string()))?;
        session.select_answer(option_index)?;
        Ok(snapshot(session))
    }

    pub async fn advance(&self, token: &str) -> Result<QuizSessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| Error::NotFound("Unknown quiz session".to_string()))?;
        let outcome = session.advance()?;

        if let AdvanceOutcome::Finished(results) = outcome {
            let new_attempt = NewAttempt {
                user_id: session.user_id.unwrap_or(1),
                user_name: session
                    .user_name
                    .clone()
                    .unwrap_or_else(|| "Guest".to_string()),
                correct_answers: results.correct_count,
                wrong_answers: results.wrong_count,
                duration_seconds: session.elapsed_seconds(),
                missed_question_ids: results.missed_question_ids.clone(),
            };
            let snap = snapshot(session);
            drop(sessions);
            self.attempts.record(new_attempt).await?;
            return Ok(snap);
        }

        Ok(snapshot(session))
    }

    pub async fn go_back(&self, token: &str) -> Result<QuizSessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| Error::NotFound("Unknown quiz session".to_string()))?;
        session.go_back()?;
        Ok(snapshot(session))
    }

    /// Drops sessions idle for longer than `ttl`; returns how many were
    /// reclaimed. Driven by the sweeper task in `main`.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for() < ttl);
        before - sessions.len()
    }

    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
