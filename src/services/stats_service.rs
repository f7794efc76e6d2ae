use std::collections::HashMap;

use crate::dto::stats_dto::{DashboardStats, MissedQuestionStat, OverviewStats};
use crate::models::attempt::QuizAttempt;
use crate::models::question::QuizQuestion;
use crate::services::attempt_service::AttemptService;
use crate::services::auth_service::AuthService;
use crate::services::flashcard_service::FlashcardService;
use crate::services::question_service::QuestionService;
use crate::services::telemetry_service::TelemetryService;

const MISSED_CHART_TOP_K: usize = 5;
const RECENT_ATTEMPTS: usize = 5;
const MISSED_LABEL_PREFIX_CHARS: usize = 15;

/// Read-side aggregation over the attempt log and the content stores. All
/// computations are pure over snapshots; nothing here mutates.
#[derive(Clone)]
pub struct StatsService {
    questions: QuestionService,
    flashcards: FlashcardService,
    attempts: AttemptService,
    telemetry: TelemetryService,
    auth: AuthService,
}

impl StatsService {
    pub fn new(
        questions: QuestionService,
        flashcards: FlashcardService,
        attempts: AttemptService,
        telemetry: TelemetryService,
        auth: AuthService,
    ) -> Self {
        Self {
            questions,
            flashcards,
            attempts,
            telemetry,
            auth,
        }
    }

    /// Share of correct answers across every logged attempt, as a percentage.
    /// An empty log (or one with zero answered questions) scores 0.
    pub fn average_score(attempts: &[QuizAttempt]) -> f64 {
        let correct: u64 = attempts.iter().map(|a| a.correct_answers as u64).sum();
        let total: u64 = attempts
            .iter()
            .map(|a| (a.correct_answers + a.wrong_answers) as u64)
            .sum();
        if total == 0 {
            return 0.0;
        }
        100.0 * correct as f64 / total as f64
    }

    /// The `top_k` most-missed questions across all attempts, ordered by miss
    /// count descending with question id ascending as the tie-break. Ids that
    /// no longer resolve get a placeholder label instead of being dropped.
    pub fn most_missed(
        attempts: &[QuizAttempt],
        questions: &[QuizQuestion],
        top_k: usize,
    ) -> Vec<MissedQuestionStat> {
        let mut missed_counts: HashMap<i64, u64> = HashMap::new();
        for attempt in attempts {
            for id in &attempt.missed_question_ids {
                *missed_counts.entry(*id).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(i64, u64)> = missed_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(top_k)
            .map(|(id, missed)| MissedQuestionStat {
                question_id: id,
                label: missed_label(id, questions),
                missed,
            })
            .collect()
    }

    pub async fn dashboard(&self) -> DashboardStats {
        let attempts = self.attempts.list().await;
        let questions = self.questions.list().await;

        DashboardStats {
            total_attempts: attempts.len() as u64,
            average_score: Self::average_score(&attempts),
            total_questions: questions.len() as u64,
            total_flashcards: self.flashcards.count().await as u64,
            most_missed: Self::most_missed(&attempts, &questions, MISSED_CHART_TOP_K),
            recent_attempts: attempts.into_iter().take(RECENT_ATTEMPTS).collect(),
        }
    }

    pub async fn overview(&self) -> OverviewStats {
        OverviewStats {
            total_users: self.auth.user_count().await as u64,
            total_questions: self.questions.count().await as u64,
            total_flashcards: self.flashcards.count().await as u64,
            total_quiz_attempts: self.attempts.count().await as u64,
            total_flashcard_views: self.telemetry.count().await as u64,
        }
    }
}

fn missed_label(id: i64, questions: &[QuizQuestion]) -> String {
    match questions.iter().find(|q| q.id == id) {
        Some(q) => {
            let prefix: String = q.question.chars().take(MISSED_LABEL_PREFIX_CHARS).collect();
            format!("Q{}: {}...", id, prefix)
        }
        None => format!("Question {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(correct: u32, wrong: u32, missed: Vec<i64>) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            user_id: 1,
            user_name: "test".into(),
            date: Utc::now(),
            correct_answers: correct,
            wrong_answers: wrong,
            duration_seconds: 10,
            missed_question_ids: missed,
        }
    }

    fn question(id: i64, text: &str) -> QuizQuestion {
        QuizQuestion {
            id,
            question: text.into(),
            options: vec!["a".into(), "b".into()],
            correct_answer_index: 0,
        }
    }

    #[test]
    fn average_score_of_empty_log_is_zero() {
        assert_eq!(StatsService::average_score(&[]), 0.0);
        assert_eq!(StatsService::average_score(&[attempt(0, 0, vec![])]), 0.0);
    }

    #[test]
    fn average_score_weights_by_question_count() {
        let attempts = vec![attempt(3, 1, vec![]), attempt(1, 3, vec![])];
        assert_eq!(StatsService::average_score(&attempts), 50.0);
    }

    #[test]
    fn most_missed_breaks_ties_by_lower_id() {
        let attempts = vec![
            attempt(0, 2, vec![7, 3]),
            attempt(0, 2, vec![3, 7]),
            attempt(0, 1, vec![5]),
        ];
        let stats = StatsService::most_missed(&attempts, &[], 10);
        assert_eq!(
            stats.iter().map(|s| s.question_id).collect::<Vec<_>>(),
            vec![3, 7, 5]
        );
        assert_eq!(stats[0].missed, 2);
    }

    #[test]
    fn most_missed_truncates_to_top_k() {
        let attempts = vec![attempt(0, 3, vec![1, 2, 3])];
        let stats = StatsService::most_missed(&attempts, &[], 2);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn missed_labels_fall_back_for_deleted_questions() {
        let questions = vec![question(1, "A question with a rather long text")];
        let attempts = vec![attempt(0, 2, vec![1, 2])];
        let stats = StatsService::most_missed(&attempts, &questions, 5);
        assert_eq!(stats[0].label, "Q1: A question with ...");
        assert_eq!(stats[1].label, "Question 2");
    }
}
