//! Request/response shapes for the JSON API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
    pub email: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub requires_two_factor: bool,
    pub user_id: Option<i32>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetupResponse {
    pub message: String,
    pub secret: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorVerifyRequest {
    pub user_id: i32,
    pub code: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorVerifyResponse {
    pub message: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub flashcard_count: i64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardResponse {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category_id: i32,
    pub category_name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub flashcard_id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    pub category_id: i32,
    pub answers: Vec<TestAnswer>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub flashcard_id: i32,
    pub selected_option_index: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultResponse {
    pub total_questions: i32,
    pub correct_answers: i32,
    pub percentage: f64,
    pub details: Vec<TestAnswerDetail>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswerDetail {
    pub flashcard_id: i32,
    pub question: String,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestHistoryResponse {
    pub id: i32,
    pub category_name: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub percentage: f64,
    pub completed_at: String,
}
