use thiserror::Error;

/// Errors from repository operations (used by trait definitions in hearth-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from chat state operations.
///
/// Every failure leaves the chat state manager at its last-known-good
/// state; none of these is retried automatically.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Operation attempted with no signed-in user. Never retried; the
    /// caller redirects to sign-in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The initial chat list fetch failed; the in-memory list is empty.
    #[error("failed to load chats: {0}")]
    Load(RepositoryError),

    /// A write was rejected by the store; no local state changed.
    #[error("failed to persist chat state: {0}")]
    Persist(RepositoryError),

    /// The referenced chat is not in the current user's list.
    #[error("chat not found")]
    ChatNotFound,

    /// A response is already being generated for this session.
    #[error("a response is already in flight")]
    Busy,
}

/// Errors from identity provider operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("session expired or revoked")]
    SessionInvalid,

    #[error("password hashing failed")]
    Hashing,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
