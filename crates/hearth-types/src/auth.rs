//! Authentication state and session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// Tri-state authentication signal.
///
/// `Loading` covers the window while a stored session is being restored;
/// callers must treat it as "not yet signed in" and show a waiting state
/// rather than a sign-in prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Loading,
    SignedIn(User),
    SignedOut,
}

impl AuthState {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }
}

/// An authenticated session handed out by the identity provider.
///
/// The token is returned to the caller exactly once; only its hash is
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::now_v7(),
            email: "ada@example.com".to_string(),
            full_name: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_auth_state_user_accessor() {
        assert!(AuthState::Loading.user().is_none());
        assert!(AuthState::SignedOut.user().is_none());

        let user = test_user();
        let state = AuthState::SignedIn(user.clone());
        assert_eq!(state.user(), Some(&user));
        assert!(state.is_signed_in());
    }

    #[test]
    fn test_loading_is_not_signed_in() {
        assert!(!AuthState::Loading.is_signed_in());
    }
}
