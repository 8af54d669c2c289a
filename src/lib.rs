pub mod db;
pub mod engine;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;

use axum::Router;

use db::Db;
use services::auth::AuthService;
use services::token::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub auth: AuthService,
    pub tokens: TokenIssuer,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::flashcards::routes())
        .merge(handlers::tests::routes())
        .with_state(state)
}
