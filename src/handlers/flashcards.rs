use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    extractors::AuthGuard,
    models::{CategoryResponse, FlashcardResponse},
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CATEGORIES_URL, get(categories))
        .route(
            "/api/flashcards/category/{category_id}",
            get(flashcards_by_category),
        )
        .route("/api/flashcards/{id}", get(flashcard))
}

async fn categories(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state
        .db
        .categories()
        .await
        .reject("could not list categories")?;

    Ok(Json(
        categories
            .into_iter()
            .map(|c| CategoryResponse {
                id: c.id,
                name: c.name,
                description: c.description,
                flashcard_count: c.flashcard_count,
            })
            .collect(),
    ))
}

async fn flashcards_by_category(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<FlashcardResponse>>, AppError> {
    let cards = state
        .db
        .flashcards_by_category(category_id)
        .await
        .reject("could not list flashcards")?;

    let category_name = state
        .db
        .category_name(category_id)
        .await
        .reject("could not resolve category name")?
        .unwrap_or_else(|| names::UNKNOWN_CATEGORY_NAME.to_string());

    Ok(Json(
        cards
            .into_iter()
            .map(|f| FlashcardResponse {
                id: f.id,
                question: f.question,
                answer: f.answer,
                category_id: f.category_id,
                category_name: category_name.clone(),
            })
            .collect(),
    ))
}

async fn flashcard(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FlashcardResponse>, AppError> {
    let card = state
        .db
        .get_flashcard(id)
        .await
        .reject("could not get flashcard")?
        .ok_or(AppError::NotFound("Flashcard not found"))?;

    Ok(Json(FlashcardResponse {
        id: card.id,
        question: card.question,
        answer: card.answer,
        category_id: card.category_id,
        category_name: card.category_name,
    }))
}
