use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::{eyre::OptionExt, Result};
use libsql::params;

use super::models::AuthUser;
use super::Db;

impl Db {
    pub async fn create_user(&self, email: &str, password: &str) -> Result<i32> {
        let password_hash = hash_password(password)?;
        let conn = self.db.connect()?;

        let user_id = conn
            .query(
                "INSERT INTO users (email, password_hash, two_factor_enabled) VALUES (?, ?, 0) RETURNING id",
                params![email, password_hash],
            )
            .await?
            .next()
            .await?
            .ok_or_eyre("could not get user id")?
            .get::<i32>(0)?;

        tracing::info!("new user registered: id={user_id}, email={email}");
        Ok(user_id)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let row = conn
            .query("SELECT 1 FROM users WHERE email = ?", params![email])
            .await?
            .next()
            .await?;
        Ok(row.is_some())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                "SELECT id, email, two_factor_enabled FROM users WHERE email = ?",
                params![email],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(auth_user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_user_by_id(&self, user_id: i32) -> Result<Option<AuthUser>> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                "SELECT id, email, two_factor_enabled FROM users WHERE id = ?",
                params![user_id],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => Ok(Some(auth_user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                "SELECT password_hash FROM users WHERE email = ?",
                params![email],
            )
            .await?
            .next()
            .await?;

        match row {
            Some(row) => {
                let stored_hash = row.get::<String>(0)?;
                Ok(verify_password(password, &stored_hash))
            }
            None => Ok(false),
        }
    }

    /// Store a fresh 2FA code as the user's secret and flip the enabled
    /// flag. Returns false when the user does not exist.
    pub async fn enable_two_factor(&self, user_id: i32, code: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let affected = conn
            .execute(
                "UPDATE users SET two_factor_enabled = 1, two_factor_secret = ? WHERE id = ?",
                params![code, user_id],
            )
            .await?;

        Ok(affected > 0)
    }

    /// The stored 2FA secret, or None when 2FA was never set up.
    pub async fn two_factor_secret(&self, user_id: i32) -> Result<Option<String>> {
        let conn = self.db.connect()?;
        let row = conn
            .query(
                "SELECT two_factor_secret FROM users WHERE id = ?",
                params![user_id],
            )
            .await?
            .next()
            .await?;

        match row.map(|row| row.get_value(0)).transpose()? {
            Some(libsql::Value::Text(secret)) => Ok(Some(secret)),
            _ => Ok(None),
        }
    }
}

fn auth_user_from_row(row: &libsql::Row) -> Result<AuthUser> {
    Ok(AuthUser {
        id: row.get::<i32>(0)?,
        email: row.get::<String>(1)?,
        two_factor_enabled: row.get::<bool>(2)?,
    })
}

/// Run argon2 hashing on a dedicated thread with a large stack to avoid
/// stack overflow in debug builds.
fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024) // 4 MB stack
        .spawn(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2::default();
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
        })?
        .join()
        .map_err(|_| color_eyre::eyre::eyre!("hash thread panicked"))?
}

fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024)
        .spawn(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(h) => h,
                Err(_) => return false,
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .map(|h| h.join().unwrap_or(false))
        .unwrap_or(false)
}
