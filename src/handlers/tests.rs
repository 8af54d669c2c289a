use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    engine,
    extractors::AuthGuard,
    models::{
        SubmitTestRequest, TestHistoryResponse, TestQuestion, TestResultResponse,
    },
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tests/generate/{category_id}", get(generate_test))
        .route(names::SUBMIT_TEST_URL, post(submit_test))
        .route(names::TEST_HISTORY_URL, get(test_history))
}

async fn generate_test(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<TestQuestion>>, AppError> {
    let pool = state
        .db
        .flashcards_by_category(category_id)
        .await
        .reject("could not load flashcards for test")?;

    if pool.is_empty() {
        return Err(AppError::NotFound("No flashcards found for this category"));
    }

    Ok(Json(engine::generate_test(&pool)))
}

async fn submit_test(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<SubmitTestRequest>,
) -> Result<Json<TestResultResponse>, AppError> {
    let pool = state
        .db
        .flashcards_by_category(body.category_id)
        .await
        .reject("could not load flashcards for scoring")?;

    let (correct_answers, details) = engine::score_test(&body.answers, &pool);
    let total_questions = body.answers.len() as i32;

    // The result is appended even when some submitted ids did not resolve.
    state
        .db
        .insert_test_result(user.id, body.category_id, total_questions, correct_answers)
        .await
        .reject("could not record test result")?;

    Ok(Json(TestResultResponse {
        total_questions,
        correct_answers,
        percentage: engine::percentage(correct_answers, total_questions),
        details,
    }))
}

async fn test_history(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<TestHistoryResponse>>, AppError> {
    let history = state
        .db
        .test_history(user.id)
        .await
        .reject("could not load test history")?;

    Ok(Json(
        history
            .into_iter()
            .map(|r| TestHistoryResponse {
                id: r.id,
                category_name: r.category_name,
                total_questions: r.total_questions,
                correct_answers: r.correct_answers,
                percentage: engine::percentage(r.correct_answers, r.total_questions),
                completed_at: r.completed_at,
            })
            .collect(),
    ))
}
