use serde::{Deserialize, Serialize};

/// A multiple-choice quiz question. `correct_answer_index` always points at a
/// valid entry of `options`; the admin services reject anything else before it
/// reaches a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

impl QuizQuestion {
    pub fn answer_in_bounds(&self, option_index: usize) -> bool {
        option_index < self.options.len()
    }
}
