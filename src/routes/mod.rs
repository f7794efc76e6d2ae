pub mod admin;
pub mod auth;
pub mod content;
pub mod flashcards;
pub mod health;
pub mod quiz;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::AppState;

/// Everything a quiz taker touches: content reads, session flows, the legacy
/// submission endpoints, and login.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/questions", get(content::list_questions))
        .route("/api/flashcards", get(content::list_flashcards))
        .route("/api/quiz-attempts", post(quiz::submit_attempt))
        .route(
            "/api/flashcard-interactions",
            post(flashcards::log_interaction),
        )
        .route("/api/quiz/sessions", post(quiz::start_session))
        .route("/api/quiz/sessions/:token", get(quiz::get_session))
        .route(
            "/api/quiz/sessions/:token/answer",
            patch(quiz::select_answer),
        )
        .route("/api/quiz/sessions/:token/advance", post(quiz::advance))
        .route("/api/quiz/sessions/:token/back", post(quiz::go_back))
        .route("/api/flashcards/sessions", post(flashcards::start_session))
        .route(
            "/api/flashcards/sessions/:token",
            get(flashcards::get_session),
        )
        .route(
            "/api/flashcards/sessions/:token/next",
            post(flashcards::next_card),
        )
        .route(
            "/api/flashcards/sessions/:token/prev",
            post(flashcards::prev_card),
        )
        .route(
            "/api/flashcards/sessions/:token/reveal",
            post(flashcards::toggle_reveal),
        )
        .route(
            "/api/flashcards/sessions/:token/shuffle",
            post(flashcards::shuffle),
        )
}

/// Admin CRUD and analytics. Callers layer `require_admin` on top.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route(
            "/api/admin/questions/:id",
            patch(admin::update_question).delete(admin::delete_question),
        )
        .route(
            "/api/admin/flashcards",
            get(admin::list_flashcards).post(admin::create_flashcard),
        )
        .route(
            "/api/admin/flashcards/:id",
            patch(admin::update_flashcard).delete(admin::delete_flashcard),
        )
        .route("/api/admin/attempts", get(admin::list_attempts))
        .route("/api/admin/dashboard", get(admin::dashboard_stats))
        .route("/api/stats/overview", get(admin::overview_stats))
}
