pub const REGISTER_URL: &str = "/api/auth/register";
pub const LOGIN_URL: &str = "/api/auth/login";
pub const VERIFY_2FA_URL: &str = "/api/auth/verify-2fa";

pub const CATEGORIES_URL: &str = "/api/flashcards/categories";
pub const SUBMIT_TEST_URL: &str = "/api/tests/submit";
pub const TEST_HISTORY_URL: &str = "/api/tests/history";

pub fn setup_2fa_url(user_id: i32) -> String {
    format!("/api/auth/setup-2fa/{user_id}")
}

pub fn flashcards_by_category_url(category_id: i32) -> String {
    format!("/api/flashcards/category/{category_id}")
}

pub fn flashcard_url(id: i32) -> String {
    format!("/api/flashcards/{id}")
}

pub fn generate_test_url(category_id: i32) -> String {
    format!("/api/tests/generate/{category_id}")
}

// Test history defaults
pub const HISTORY_LIMIT: i32 = 20;
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
