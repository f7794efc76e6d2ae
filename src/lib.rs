pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    attempt_service::AttemptService, auth_service::AuthService,
    flashcard_service::FlashcardService, flashcard_session::FlashcardSessionService,
    question_service::QuestionService, quiz_session::QuizSessionService,
    stats_service::StatsService, telemetry_service::TelemetryService,
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: QuestionService,
    pub flashcard_service: FlashcardService,
    pub attempt_service: AttemptService,
    pub telemetry_service: TelemetryService,
    pub quiz_sessions: QuizSessionService,
    pub flashcard_sessions: FlashcardSessionService,
    pub stats_service: StatsService,
    pub auth_service: AuthService,
}

impl AppState {
    /// Must run inside a tokio runtime: the telemetry service spawns its
    /// drain task on construction.
    pub fn new() -> crate::error::Result<Self> {
        let config = crate::config::get_config();

        let question_service = QuestionService::new();
        let flashcard_service = FlashcardService::new();
        let attempt_service = AttemptService::new();
        let telemetry_service = TelemetryService::new();
        let auth_service = AuthService::new(&config.admin_username, &config.admin_password)?;
        let quiz_sessions = QuizSessionService::new(attempt_service.clone());
        let flashcard_sessions = FlashcardSessionService::new(telemetry_service.clone());
        let stats_service = StatsService::new(
            question_service.clone(),
            flashcard_service.clone(),
            attempt_service.clone(),
            telemetry_service.clone(),
            auth_service.clone(),
        );

        Ok(Self {
            question_service,
            flashcard_service,
            attempt_service,
            telemetry_service,
            quiz_sessions,
            flashcard_sessions,
            stats_service,
            auth_service,
        })
    }

    /// Seeds starter content so a fresh server has something to quiz on.
    /// Only runs against empty stores.
    pub async fn seed_demo_data(&self) -> crate::error::Result<()> {
        use crate::services::flashcard_service::NewFlashcard;
        use crate::services::question_service::NewQuestion;

        if self.question_service.count().await == 0 {
            let questions = [
                NewQuestion {
                    question: "What is the capital of France?".to_string(),
                    options: vec![
                        "Berlin".to_string(),
                        "Madrid".to_string(),
                        "Paris".to_string(),
                        "Rome".to_string(),
                    ],
                    correct_answer_index: 2,
                },
                NewQuestion {
                    question: "Which planet is known as the Red Planet?".to_string(),
                    options: vec![
                        "Venus".to_string(),
                        "Mars".to_string(),
                        "Jupiter".to_string(),
                        "Saturn".to_string(),
                    ],
                    correct_answer_index: 1,
                },
                NewQuestion {
                    question: "What is the largest ocean on Earth?".to_string(),
                    options: vec![
                        "Atlantic".to_string(),
                        "Indian".to_string(),
                        "Arctic".to_string(),
                        "Pacific".to_string(),
                    ],
                    correct_answer_index: 3,
                },
                NewQuestion {
                    question: "In which year did the Second World War end?".to_string(),
                    options: vec![
                        "1943".to_string(),
                        "1944".to_string(),
                        "1945".to_string(),
                        "1946".to_string(),
                    ],
                    correct_answer_index: 2,
                },
            ];
            for question in questions {
                self.question_service.create(question).await?;
            }
        }

        if self.flashcard_service.count().await == 0 {
            let cards = [
                NewFlashcard {
                    question: "What does HTTP stand for?".to_string(),
                    answer: "HyperText Transfer Protocol".to_string(),
                },
                NewFlashcard {
                    question: "What is the chemical symbol for gold?".to_string(),
                    answer: "Au".to_string(),
                },
                NewFlashcard {
                    question: "Who wrote \"One Hundred Years of Solitude\"?".to_string(),
                    answer: "Gabriel Garcia Marquez".to_string(),
                },
                NewFlashcard {
                    question: "What is the speed of light in a vacuum?".to_string(),
                    answer: "About 299,792 kilometres per second".to_string(),
                },
            ];
            for card in cards {
                self.flashcard_service.create(card).await?;
            }
        }

        Ok(())
    }
}
