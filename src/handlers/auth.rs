use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::{
    models::{
        LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TwoFactorSetupResponse,
        TwoFactorVerifyRequest, TwoFactorVerifyResponse,
    },
    names,
    rejections::{AppError, ResultExt},
    services::auth::{
        LoginOutcome, RegisterOutcome, SetupTwoFactorOutcome, VerifyTwoFactorOutcome,
    },
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::REGISTER_URL, post(register))
        .route(names::LOGIN_URL, post(login))
        .route("/api/auth/setup-2fa/{user_id}", post(setup_two_factor))
        .route(names::VERIFY_2FA_URL, post(verify_two_factor))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let outcome = state
        .auth
        .register(&body.email, &body.password, &body.confirm_password)
        .await
        .reject("could not register user")?;

    match outcome {
        RegisterOutcome::Created { user_id, email } => Ok(Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user_id,
            email,
        })),
        RegisterOutcome::PasswordMismatch => {
            Err(AppError::Validation("Passwords do not match"))
        }
        RegisterOutcome::WeakPassword => Err(AppError::Validation(
            "Password must be at least 6 characters long",
        )),
        RegisterOutcome::EmailTaken => Err(AppError::Validation(
            "User with this email already exists",
        )),
    }
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state
        .auth
        .login(&body.email, &body.password)
        .await
        .reject("could not log in user")?;

    match outcome {
        LoginOutcome::Success { token } => Ok(Json(LoginResponse {
            token: Some(token),
            requires_two_factor: false,
            user_id: None,
        })),
        LoginOutcome::RequiresTwoFactor { user_id } => Ok(Json(LoginResponse {
            token: None,
            requires_two_factor: true,
            user_id: Some(user_id),
        })),
        LoginOutcome::InvalidCredentials => Err(AppError::Auth("Invalid email or password")),
    }
}

async fn setup_two_factor(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<TwoFactorSetupResponse>, AppError> {
    let outcome = state
        .auth
        .setup_two_factor(user_id)
        .await
        .reject("could not set up two-factor authentication")?;

    match outcome {
        SetupTwoFactorOutcome::Enabled { code } => Ok(Json(TwoFactorSetupResponse {
            message: "Two-factor authentication enabled".to_string(),
            secret: code,
        })),
        SetupTwoFactorOutcome::UserNotFound => Err(AppError::NotFound("User not found")),
    }
}

async fn verify_two_factor(
    State(state): State<AppState>,
    Json(body): Json<TwoFactorVerifyRequest>,
) -> Result<Json<TwoFactorVerifyResponse>, AppError> {
    let outcome = state
        .auth
        .verify_two_factor(body.user_id, &body.code)
        .await
        .reject("could not verify two-factor code")?;

    match outcome {
        VerifyTwoFactorOutcome::Success { token } => Ok(Json(TwoFactorVerifyResponse {
            message: "Verification successful".to_string(),
            token,
        })),
        VerifyTwoFactorOutcome::UserNotFound => Err(AppError::NotFound("User not found")),
        VerifyTwoFactorOutcome::NotEnabled => Err(AppError::Auth(
            "Two-factor authentication not enabled",
        )),
        VerifyTwoFactorOutcome::InvalidCode => Err(AppError::Auth("Invalid code")),
    }
}
