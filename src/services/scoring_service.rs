use crate::models::question::QuizQuestion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub percentage: u32,
    pub missed_question_ids: Vec<i64>,
}

pub struct ScoringService;

impl ScoringService {
    /// Grades a full answer sheet against the question list. An unanswered
    /// question (`None`) counts as missed. With zero questions every field is
    /// zero; percentage never divides by zero.
    pub fn score(questions: &[QuizQuestion], answers: &[Option<usize>]) -> QuizResults {
        let mut correct_count: u32 = 0;
        let mut missed_question_ids: Vec<i64> = Vec::new();

        for (idx, question) in questions.iter().enumerate() {
            let selected = answers.get(idx).copied().flatten();
            if selected == Some(question.correct_answer_index) {
                correct_count += 1;
            } else {
                missed_question_ids.push(question.id);
            }
        }

        let total = questions.len() as u32;
        let wrong_count = total - correct_count;
        let percentage = if total > 0 {
            ((100.0 * correct_count as f64) / total as f64).round() as u32
        } else {
            0
        };

        QuizResults {
            correct_count,
            wrong_count,
            percentage,
            missed_question_ids,
        }
    }
}
