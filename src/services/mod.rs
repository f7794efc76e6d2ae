pub mod attempt_service;
pub mod auth_service;
pub mod flashcard_service;
pub mod flashcard_session;
pub mod question_service;
pub mod quiz_session;
pub mod scoring_service;
pub mod stats_service;
pub mod telemetry_service;
