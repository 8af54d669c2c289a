mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

use flashdeck::models::{
    CategoryResponse, FlashcardResponse, LoginResponse, RegisterResponse, TestHistoryResponse,
    TestQuestion, TestResultResponse, TwoFactorSetupResponse, TwoFactorVerifyResponse,
};

async fn app() -> axum::Router {
    flashdeck::router(common::test_state().await)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::empty())
        .expect("request build should succeed")
}

async fn body_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

async fn register(app: &axum::Router, email: &str, password: &str) -> RegisterResponse {
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "email": email, "password": password, "confirmPassword": password }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

async fn login_token(app: &axum::Router, email: &str, password: &str) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let login: LoginResponse = body_json(resp).await;
    assert!(!login.requires_two_factor);
    login.token.expect("login should issue a token")
}

// ---------------------------------------------------------------------------
// Auth guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_routes_reject_requests_without_a_token() {
    let app = app().await;

    let cases = [
        (Method::GET, "/api/flashcards/categories", Body::empty()),
        (Method::GET, "/api/flashcards/category/1", Body::empty()),
        (Method::GET, "/api/flashcards/1", Body::empty()),
        (Method::GET, "/api/tests/generate/1", Body::empty()),
        (Method::GET, "/api/tests/history", Body::empty()),
        (
            Method::POST,
            "/api/tests/submit",
            Body::from(r#"{"categoryId":1,"answers":[]}"#),
        ),
    ];

    for (method, uri, body) in cases {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}"
        );
    }
}

#[tokio::test]
async fn protected_routes_reject_garbage_tokens() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(get_request(
            "/api/flashcards/categories",
            Some("not-a-real-token"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_then_login_issues_a_usable_token() {
    let app = app().await;

    let created = register(&app, "alice@example.com", "secret-password").await;
    assert_eq!(created.email, "alice@example.com");

    let token = login_token(&app, "alice@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/flashcards/categories", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_validation_failures_return_bad_request() {
    let app = app().await;

    // Mismatched confirmation
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "email": "a@b.com", "password": "abcdef", "confirmPassword": "different" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Five characters: below the boundary
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "email": "a@b.com", "password": "abcde", "confirmPassword": "abcde" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Exactly six characters: accepted
    register(&app, "a@b.com", "abcdef").await;

    // Same email a second time
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "email": "a@b.com", "password": "abcdef", "confirmPassword": "abcdef" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_bad_credentials_is_a_generic_401() {
    let app = app().await;
    register(&app, "carol@example.com", "secret-password").await;

    for (email, password) in [
        ("carol@example.com", "wrong-password"),
        ("unknown@example.com", "secret-password"),
    ] {
        let resp = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = body_json(resp).await;
        assert_eq!(body["message"], "Invalid email or password");
    }
}

// ---------------------------------------------------------------------------
// Two-factor flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn two_factor_setup_then_verify_issues_a_token() {
    let app = app().await;
    let created = register(&app, "dave@example.com", "secret-password").await;

    // Enable 2FA; the code comes back in the response (and on the log).
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/auth/setup-2fa/{}", created.user_id),
            None,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let setup: TwoFactorSetupResponse = body_json(resp).await;
    assert_eq!(setup.secret.len(), 6);

    // Login now withholds the token and flags the second factor.
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "dave@example.com", "password": "secret-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let login: LoginResponse = body_json(resp).await;
    assert!(login.requires_two_factor);
    assert!(login.token.is_none());
    assert_eq!(login.user_id, Some(created.user_id));

    // Wrong code is rejected.
    let wrong = if setup.secret == "111111" { "222222" } else { "111111" };
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/verify-2fa",
            None,
            json!({ "userId": created.user_id, "code": wrong }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Exact code gets a usable token.
    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/verify-2fa",
            None,
            json!({ "userId": created.user_id, "code": setup.secret }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let verified: TwoFactorVerifyResponse = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/tests/history", Some(&verified.token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn verify_without_setup_is_rejected() {
    let app = app().await;
    let created = register(&app, "erin@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/verify-2fa",
            None,
            json!({ "userId": created.user_id, "code": "123456" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[tokio::test]
async fn categories_and_flashcards_are_browsable() {
    let app = app().await;
    register(&app, "frank@example.com", "secret-password").await;
    let token = login_token(&app, "frank@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/flashcards/categories", Some(&token)))
        .await
        .unwrap();
    let categories: Vec<CategoryResponse> = body_json(resp).await;
    assert_eq!(categories.len(), 5);
    assert!(categories.iter().all(|c| c.flashcard_count == 10));

    let resp = app
        .clone()
        .oneshot(get_request("/api/flashcards/category/1", Some(&token)))
        .await
        .unwrap();
    let cards: Vec<FlashcardResponse> = body_json(resp).await;
    assert_eq!(cards.len(), 10);
    assert!(cards.iter().all(|c| c.category_name == "SQL"));

    let resp = app
        .clone()
        .oneshot(get_request("/api/flashcards/11", Some(&token)))
        .await
        .unwrap();
    let card: FlashcardResponse = body_json(resp).await;
    assert_eq!(card.category_name, ".NET");

    let resp = app
        .clone()
        .oneshot(get_request("/api/flashcards/9999", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test engine end-to-end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_test_can_be_submitted_for_a_perfect_score() {
    let app = app().await;
    register(&app, "grace@example.com", "secret-password").await;
    let token = login_token(&app, "grace@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/tests/generate/1", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let questions: Vec<TestQuestion> = body_json(resp).await;
    assert_eq!(questions.len(), 10);
    assert!(questions.iter().all(|q| q.options.len() == 4));

    let answers: Vec<Value> = questions
        .iter()
        .map(|q| {
            json!({
                "flashcardId": q.flashcard_id,
                "selectedOptionIndex": q.correct_option_index,
            })
        })
        .collect();

    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tests/submit",
            Some(&token),
            json!({ "categoryId": 1, "answers": answers }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: TestResultResponse = body_json(resp).await;

    assert_eq!(result.total_questions, 10);
    assert_eq!(result.correct_answers, 10);
    assert_eq!(result.percentage, 100.0);
    assert!(result.details.iter().all(|d| d.is_correct));

    // The submission lands in the history with the category resolved.
    let resp = app
        .clone()
        .oneshot(get_request("/api/tests/history", Some(&token)))
        .await
        .unwrap();
    let history: Vec<TestHistoryResponse> = body_json(resp).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].category_name, "SQL");
    assert_eq!(history[0].percentage, 100.0);
}

#[tokio::test]
async fn generating_a_test_for_an_empty_category_is_not_found() {
    let app = app().await;
    register(&app, "heidi@example.com", "secret-password").await;
    let token = login_token(&app, "heidi@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(get_request("/api/tests/generate/424242", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "No flashcards found for this category");
}

#[tokio::test]
async fn submission_with_unknown_cards_still_records_a_result() {
    let app = app().await;
    register(&app, "ivan@example.com", "secret-password").await;
    let token = login_token(&app, "ivan@example.com", "secret-password").await;

    let resp = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/tests/submit",
            Some(&token),
            json!({
                "categoryId": 1,
                "answers": [
                    { "flashcardId": 999999, "selectedOptionIndex": 0 },
                    { "flashcardId": 1, "selectedOptionIndex": -1 },
                ],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: TestResultResponse = body_json(resp).await;

    // Unknown ids are skipped from details but still count toward the total.
    assert_eq!(result.total_questions, 2);
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].user_answer, "No answer");
    assert_eq!(result.correct_answers, 0);

    let resp = app
        .clone()
        .oneshot(get_request("/api/tests/history", Some(&token)))
        .await
        .unwrap();
    let history: Vec<TestHistoryResponse> = body_json(resp).await;
    assert_eq!(history.len(), 1);
}
