use flashdeck::db::Db;
use flashdeck::services::auth::AuthService;
use flashdeck::services::token::TokenIssuer;
use flashdeck::AppState;

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("flashdeck_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("file:{}", path.display());
    Db::new(url, String::new())
        .await
        .expect("failed to create test database")
}

#[allow(dead_code)]
pub fn test_tokens() -> TokenIssuer {
    TokenIssuer::new(
        "integration-test-secret".to_string(),
        "flashdeck".to_string(),
        "flashdeck-client".to_string(),
        60,
    )
}

#[allow(dead_code)]
pub async fn test_state() -> AppState {
    let db = create_test_db().await;
    let tokens = test_tokens();
    let auth = AuthService::new(db.clone(), tokens.clone());
    AppState { db, auth, tokens }
}
