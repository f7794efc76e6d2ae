use serde::Deserialize;
use validator::Validate;

use super::trim_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionPayload {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,
    #[validate(length(min = 2, message = "At least two options are required"))]
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionPayload {
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer_index: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashcardPayload {
    #[validate(length(min = 1, message = "Flashcard question is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Flashcard answer is required"))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlashcardPayload {
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub answer: Option<String>,
}
