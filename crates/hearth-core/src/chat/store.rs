//! ChatStore trait definition.
//!
//! CRUD operations for chat and message records, always scoped to the
//! owning user -- the `user_id` equality filter is the only access-control
//! mechanism assumed. Uses native async fn in traits (RPITIT, Rust 2024
//! edition); implementations live in hearth-infra (`SqliteChatStore`).

use chrono::{DateTime, Utc};
use hearth_types::chat::{Chat, ChatMessage};
use hearth_types::error::RepositoryError;
use uuid::Uuid;

/// Store port for chat and message persistence.
///
/// Mutations return `RepositoryError::NotFound` when the (id, user_id)
/// scope matches no row, which is how ownership violations surface.
pub trait ChatStore: Send + Sync {
    /// Insert a new chat (its message list is expected to be empty).
    fn insert_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a new message into a chat owned by `user_id`.
    ///
    /// Fails with `NotFound` if the chat does not exist or belongs to a
    /// different user.
    fn insert_message(
        &self,
        user_id: &Uuid,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Update a chat's title and `updated_at`, scoped to the owner.
    fn update_title(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
        title: &str,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Bump a chat's `updated_at` timestamp, scoped to the owner.
    fn touch(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a chat and (by cascade) its messages, scoped to the owner.
    fn delete_chat(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List every chat owned by `user_id`, ordered by `updated_at` DESC,
    /// with messages nested in chronological order.
    fn list_chats(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;
}
