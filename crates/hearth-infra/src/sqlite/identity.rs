//! SQLite identity provider implementation.
//!
//! Implements `IdentityProvider` from `hearth-core`. Passwords are hashed
//! with Argon2id; session tokens are random 256-bit strings handed to the
//! client once, with only their SHA-256 digest stored in `auth_sessions`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use hearth_core::auth::IdentityProvider;
use hearth_types::auth::AuthSession;
use hearth_types::error::{AuthError, RepositoryError};
use hearth_types::user::User;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use super::pool::DatabasePool;

/// How long a session token stays valid.
const SESSION_TTL_DAYS: i64 = 30;

/// SQLite-backed implementation of `IdentityProvider`.
pub struct SqliteIdentityProvider {
    pool: DatabasePool,
}

impl SqliteIdentityProvider {
    /// Create a new provider backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Open a fresh session for `user` and return it with the plain token.
    async fn open_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);

        sqlx::query(
            r#"INSERT INTO auth_sessions (token_hash, user_id, created_at, expires_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(token_digest(&token))
        .bind(user.id.to_string())
        .bind(Utc::now().to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;

        Ok(AuthSession {
            user,
            token,
            expires_at,
        })
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<(User, String)>, AuthError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;

        match row {
            Some(row) => {
                let user_row = UserRow::from_row(&row)
                    .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct UserRow {
    id: String,
    email: String,
    full_name: Option<String>,
    avatar_url: Option<String>,
    password_hash: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            avatar_url: row.try_get("avatar_url")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<(User, String), AuthError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| AuthError::Storage(RepositoryError::Query(format!("invalid user id: {e}"))))?;
        let user = User {
            id,
            email: self.email,
            full_name: self.full_name,
            avatar_url: self.avatar_url,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        };
        Ok((user, self.password_hash))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, AuthError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AuthError::Storage(RepositoryError::Query(format!("invalid datetime: {e}"))))
}

/// 256-bit random token, hex-encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 digest of a token, hex-encoded. Only digests touch the database.
fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AuthError::Hashing)
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::Hashing)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// IdentityProvider implementation
// ---------------------------------------------------------------------------

impl IdentityProvider for SqliteIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        full_name: Option<&str>,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        let password_hash = hash_password(password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email: email.clone(),
            full_name: full_name.map(str::to_string),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            r#"INSERT INTO users (id, email, full_name, avatar_url, password_hash, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar_url)
        .bind(&password_hash)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool.writer)
        .await;

        if let Err(err) = result {
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                return Err(AuthError::EmailTaken(email));
            }
            return Err(AuthError::Storage(RepositoryError::Query(err.to_string())));
        }

        debug!(user_id = %user.id, "registered new account");
        self.open_session(user).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        let Some((user, password_hash)) = self.user_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.open_session(user).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        // Unknown tokens are a no-op, not an error.
        sqlx::query("DELETE FROM auth_sessions WHERE token_hash = ?")
            .bind(token_digest(token))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;

        Ok(())
    }

    async fn current_session(&self, token: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"SELECT u.* FROM users u
               JOIN auth_sessions s ON s.user_id = u.id
               WHERE s.token_hash = ? AND s.expires_at > ?"#,
        )
        .bind(token_digest(token))
        .bind(Utc::now().to_rfc3339())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;

        match row {
            Some(row) => {
                let user_row = UserRow::from_row(&row)
                    .map_err(|e| AuthError::Storage(RepositoryError::Query(e.to_string())))?;
                let (user, _) = user_row.into_user()?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
