// Database model structs, deserialized via `libsql::de::from_row`.

use serde::Deserialize;

#[derive(Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub two_factor_enabled: bool,
}

#[derive(Clone, Deserialize)]
pub struct FlashcardRow {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category_id: i32,
}

#[derive(Deserialize)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub flashcard_count: i64,
}

#[derive(Deserialize)]
pub struct FlashcardDetailRow {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category_id: i32,
    pub category_name: String,
}

#[derive(Deserialize)]
pub struct TestResultRow {
    pub id: i32,
    pub category_name: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub completed_at: String,
}
