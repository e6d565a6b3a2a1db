//! Tri-state authentication gate.
//!
//! Tracks `Loading` / `SignedIn` / `SignedOut` and re-broadcasts every
//! transition over a `tokio::sync::watch` channel so interested parties
//! (the presentation layer, the chat state manager) observe the latest
//! state without polling.

use hearth_types::auth::AuthState;
use hearth_types::error::ChatError;
use hearth_types::user::User;
use tokio::sync::watch;

/// Shared authentication signal.
///
/// Starts in `Loading`. Cloning the gate clones the channel handles; all
/// clones observe the same state.
#[derive(Clone)]
pub struct AuthGate {
    tx: watch::Sender<AuthState>,
    rx: watch::Receiver<AuthState>,
}

impl AuthGate {
    /// Create a gate in the `Loading` state.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(AuthState::Loading);
        Self { tx, rx }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Transition to `SignedIn(user)`.
    pub fn set_signed_in(&self, user: User) {
        let _ = self.tx.send(AuthState::SignedIn(user));
    }

    /// Transition to `SignedOut`.
    pub fn set_signed_out(&self) {
        let _ = self.tx.send(AuthState::SignedOut);
    }

    /// The signed-in user, or `NotAuthenticated`.
    ///
    /// `Loading` also refuses: no chat operation is permitted until the
    /// session restore settles.
    pub fn require_user(&self) -> Result<User, ChatError> {
        match &*self.rx.borrow() {
            AuthState::SignedIn(user) => Ok(user.clone()),
            AuthState::Loading | AuthState::SignedOut => Err(ChatError::NotAuthenticated),
        }
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("state", &*self.rx.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
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
    fn test_starts_loading() {
        let gate = AuthGate::new();
        assert_eq!(gate.state(), AuthState::Loading);
    }

    #[test]
    fn test_loading_blocks_operations() {
        let gate = AuthGate::new();
        assert!(matches!(
            gate.require_user(),
            Err(ChatError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_signed_out_blocks_operations() {
        let gate = AuthGate::new();
        gate.set_signed_out();
        assert!(matches!(
            gate.require_user(),
            Err(ChatError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_sign_in_unblocks() {
        let gate = AuthGate::new();
        let user = test_user();
        gate.set_signed_in(user.clone());
        assert_eq!(gate.require_user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_clones_observe_transitions() {
        let gate = AuthGate::new();
        let clone = gate.clone();
        let mut sub = gate.subscribe();

        gate.set_signed_in(test_user());
        assert!(clone.state().is_signed_in());

        sub.changed().await.unwrap();
        assert!(sub.borrow().is_signed_in());

        gate.set_signed_out();
        assert_eq!(clone.state(), AuthState::SignedOut);
    }
}
