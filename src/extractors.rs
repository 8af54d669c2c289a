use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{rejections::AppError, AppState};

/// The identity carried by a verified bearer token.
#[derive(Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
}

/// Guard extractor that verifies the `Authorization: Bearer` token against
/// the configured issuer. Any failure (missing header, bad signature,
/// expired token, malformed subject) is a uniform 401.
pub struct AuthGuard(pub CurrentUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let claims = state
            .tokens
            .verify(bearer.token())
            .map_err(|_| AppError::Unauthorized)?;

        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(AuthGuard(CurrentUser {
            id,
            email: claims.email,
        }))
    }
}
