use color_eyre::Result;
use rand::Rng;

use crate::db::models::AuthUser;
use crate::db::Db;
use crate::services::token::TokenIssuer;

// ---------------------------------------------------------------------------
// AuthRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    fn email_exists(&self, email: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<i32>> + Send;

    fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<AuthUser>>> + Send;

    fn find_user_by_id(
        &self,
        user_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<AuthUser>>> + Send;

    fn enable_two_factor(
        &self,
        user_id: i32,
        code: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn two_factor_secret(
        &self,
        user_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

impl AuthRepository for Db {
    async fn email_exists(&self, email: &str) -> Result<bool> {
        Db::email_exists(self, email).await
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<i32> {
        Db::create_user(self, email, password).await
    }

    async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        Db::verify_user_password(self, email, password).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        Db::find_user_by_email(self, email).await
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<AuthUser>> {
        Db::find_user_by_id(self, user_id).await
    }

    async fn enable_two_factor(&self, user_id: i32, code: &str) -> Result<bool> {
        Db::enable_two_factor(self, user_id, code).await
    }

    async fn two_factor_secret(&self, user_id: i32) -> Result<Option<String>> {
        Db::two_factor_secret(self, user_id).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum RegisterOutcome {
    /// User created with 2FA disabled.
    Created { user_id: i32, email: String },
    /// Password and confirmation differ.
    PasswordMismatch,
    /// Password shorter than the minimum length.
    WeakPassword,
    /// Email already registered.
    EmailTaken,
}

pub enum LoginOutcome {
    /// Credentials accepted, token issued.
    Success { token: String },
    /// Credentials accepted but a 2FA code must be verified first;
    /// no token yet.
    RequiresTwoFactor { user_id: i32 },
    /// Unknown email or wrong password; callers must not distinguish.
    InvalidCredentials,
}

pub enum SetupTwoFactorOutcome {
    /// 2FA enabled; the code doubles as the stored secret.
    Enabled { code: String },
    UserNotFound,
}

pub enum VerifyTwoFactorOutcome {
    /// Code matched, token issued.
    Success { token: String },
    UserNotFound,
    /// 2FA was never set up for this user.
    NotEnabled,
    /// Submitted code differs from the stored secret. Attempts are not
    /// counted or rate-limited.
    InvalidCode,
}

const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthService<R: AuthRepository = Db> {
    repo: R,
    tokens: TokenIssuer,
}

impl<R: AuthRepository + Clone> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<RegisterOutcome> {
        if password != confirm_password {
            return Ok(RegisterOutcome::PasswordMismatch);
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Ok(RegisterOutcome::WeakPassword);
        }

        if self.repo.email_exists(email).await? {
            return Ok(RegisterOutcome::EmailTaken);
        }

        let user_id = self.repo.create_user(email, password).await?;

        Ok(RegisterOutcome::Created {
            user_id,
            email: email.to_string(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let verified = self.repo.verify_user_password(email, password).await?;

        if !verified {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let user =
            self.repo.find_user_by_email(email).await?.ok_or_else(|| {
                color_eyre::eyre::eyre!("user not found after password verification")
            })?;

        tracing::info!("user logged in: {email}");

        if user.two_factor_enabled {
            return Ok(LoginOutcome::RequiresTwoFactor { user_id: user.id });
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(LoginOutcome::Success { token })
    }

    pub async fn setup_two_factor(&self, user_id: i32) -> Result<SetupTwoFactorOutcome> {
        let Some(user) = self.repo.find_user_by_id(user_id).await? else {
            return Ok(SetupTwoFactorOutcome::UserNotFound);
        };

        let code = generate_two_factor_code();

        if !self.repo.enable_two_factor(user.id, &code).await? {
            return Ok(SetupTwoFactorOutcome::UserNotFound);
        }

        // The code is surfaced out-of-band on the log channel. A real
        // deployment would deliver it over a secure side channel.
        tracing::warn!("\n\n========================================");
        tracing::warn!("2FA SETUP for {}", user.email);
        tracing::warn!("Your 2FA code is: {code}");
        tracing::warn!("========================================\n");

        Ok(SetupTwoFactorOutcome::Enabled { code })
    }

    pub async fn verify_two_factor(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<VerifyTwoFactorOutcome> {
        let Some(user) = self.repo.find_user_by_id(user_id).await? else {
            return Ok(VerifyTwoFactorOutcome::UserNotFound);
        };

        if !user.two_factor_enabled {
            return Ok(VerifyTwoFactorOutcome::NotEnabled);
        }

        let Some(secret) = self.repo.two_factor_secret(user.id).await? else {
            return Ok(VerifyTwoFactorOutcome::NotEnabled);
        };

        if secret != code {
            tracing::warn!("failed 2FA attempt for {}", user.email);
            return Ok(VerifyTwoFactorOutcome::InvalidCode);
        }

        tracing::info!("successful 2FA verification for {}", user.email);

        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(VerifyTwoFactorOutcome::Success { token })
    }
}

/// A uniformly random 6-digit code in [100000, 999999].
fn generate_two_factor_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
