//! IdentityProvider trait definition.
//!
//! Operations consumed from the identity backend: sign-up, sign-in,
//! sign-out, and session restoration. Uses native async fn in traits
//! (RPITIT); the SQLite implementation lives in hearth-infra.

use hearth_types::auth::AuthSession;
use hearth_types::error::AuthError;
use hearth_types::user::User;

/// Port for the identity backend.
///
/// Tokens are opaque bearer strings; `current_session` returns `None` for
/// unknown or expired tokens rather than an error, so callers can treat
/// "no session" as the ordinary signed-out case.
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and open a session for it.
    fn sign_up(
        &self,
        email: &str,
        full_name: Option<&str>,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Verify credentials and open a session.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Revoke the session behind `token`. Revoking an unknown token is not
    /// an error.
    fn sign_out(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Resolve a bearer token to its user, if the session is still live.
    fn current_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, AuthError>> + Send;
}
