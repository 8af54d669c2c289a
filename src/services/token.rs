//! Signed bearer tokens carrying the user identity claims.

use chrono::{Duration, Utc};
use color_eyre::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 JWTs. Verification enforces signature,
/// expiry, issuer and audience.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    issuer: String,
    audience: String,
    expiry_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, issuer: String, audience: String, expiry_minutes: i64) -> Self {
        Self {
            secret,
            issuer,
            audience,
            expiry_minutes,
        }
    }

    pub fn issue(&self, user_id: i32, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_owned(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}
