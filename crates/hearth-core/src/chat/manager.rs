//! Chat state manager.
//!
//! The single in-memory source of truth for what the current user sees,
//! kept synchronized with the [`ChatStore`] after every mutation. All
//! mutations are persist-then-reflect: nothing appears locally until the
//! store has accepted the write, so a failure leaves the manager at its
//! last-known-good state.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use hearth_types::chat::{Chat, ChatMessage, MessageAuthor};
use hearth_types::error::ChatError;

use crate::auth::AuthGate;
use crate::chat::store::ChatStore;
use crate::chat::title::{derive_title, truncate_title};
use crate::generate::ResponseGenerator;
use crate::llm::LlmProvider;

/// One completed conversation turn: the user message paired with the
/// assistant's reply. Not a persisted entity.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub chat_id: Uuid,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

/// In-memory chat list for one user session, synchronized with the store.
///
/// Exactly one chat may be "current" at a time, or none. The `responding`
/// flag is session-wide: while a reply is being generated, further sends
/// fail fast with [`ChatError::Busy`].
pub struct ChatStateManager<S: ChatStore> {
    store: S,
    gate: AuthGate,
    chats: Vec<Chat>,
    current: Option<Uuid>,
    responding: bool,
}

impl<S: ChatStore> ChatStateManager<S> {
    pub fn new(store: S, gate: AuthGate) -> Self {
        Self {
            store,
            gate,
            chats: Vec::new(),
            current: None,
            responding: false,
        }
    }

    /// Chats in presentation order: most-recently-updated first.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Id of the current chat, if any.
    pub fn current_id(&self) -> Option<Uuid> {
        self.current
    }

    /// The current chat, if one is selected and present in the list.
    pub fn current_chat(&self) -> Option<&Chat> {
        let id = self.current?;
        self.chats.iter().find(|c| c.id == id)
    }

    /// Whether a reply is being generated for this session.
    pub fn is_responding(&self) -> bool {
        self.responding
    }

    /// The authentication gate this manager consults.
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// Make `chat_id` current.
    ///
    /// State-wise this accepts any id; the caller is responsible for
    /// validating existence before offering selection.
    pub fn select_chat(&mut self, chat_id: Option<Uuid>) {
        self.current = chat_id;
    }

    /// Drop all local state. Called on sign-out.
    pub fn clear(&mut self) {
        self.chats.clear();
        self.current = None;
    }

    /// Fetch every chat owned by the signed-in user, most recent first.
    ///
    /// While signed out (or still loading) the list is simply cleared. On
    /// store failure the list is left empty and the error is surfaced; no
    /// automatic retry.
    pub async fn load_all(&mut self) -> Result<(), ChatError> {
        let user = match self.gate.require_user() {
            Ok(user) => user,
            Err(_) => {
                self.clear();
                return Ok(());
            }
        };

        match self.store.list_chats(&user.id).await {
            Ok(chats) => {
                debug!(count = chats.len(), "loaded chats");
                self.chats = chats;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load chats");
                self.chats.clear();
                Err(ChatError::Load(err))
            }
        }
    }

    /// Create a chat with the given title (capped at 100 characters),
    /// prepend it, and make it current.
    pub async fn create_chat(&mut self, title: &str) -> Result<Chat, ChatError> {
        let user = self.gate.require_user()?;
        let now = Utc::now();
        let chat = Chat {
            id: Uuid::now_v7(),
            user_id: user.id,
            title: truncate_title(title),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        };

        self.store
            .insert_chat(&chat)
            .await
            .map_err(ChatError::Persist)?;

        self.chats.insert(0, chat.clone());
        self.current = Some(chat.id);
        Ok(chat)
    }

    /// Append a message to a chat in the user's list.
    ///
    /// Persists the message, issues a separate timestamp-touch on the chat
    /// row, then reflects both in memory and resorts the list. A failed
    /// persist adds nothing locally.
    pub async fn append_message(
        &mut self,
        chat_id: Uuid,
        content: &str,
        author: MessageAuthor,
    ) -> Result<ChatMessage, ChatError> {
        let user = self.gate.require_user()?;
        let idx = self
            .chats
            .iter()
            .position(|c| c.id == chat_id)
            .ok_or(ChatError::ChatNotFound)?;

        let message = ChatMessage {
            id: Uuid::now_v7(),
            chat_id,
            content: content.to_string(),
            author,
            created_at: Utc::now(),
        };

        self.store
            .insert_message(&user.id, &message)
            .await
            .map_err(ChatError::Persist)?;

        let touched = Utc::now();
        if let Err(err) = self.store.touch(&chat_id, &user.id, touched).await {
            // The message itself is durable; the stale timestamp heals on
            // the next successful mutation.
            warn!(%chat_id, error = %err, "failed to touch chat timestamp");
        }

        let chat = &mut self.chats[idx];
        chat.messages.push(message.clone());
        chat.updated_at = touched;
        self.sort_chats();

        Ok(message)
    }

    /// Rename a chat, capping the title at 100 characters.
    pub async fn rename_chat(&mut self, chat_id: Uuid, title: &str) -> Result<(), ChatError> {
        let user = self.gate.require_user()?;
        let idx = self
            .chats
            .iter()
            .position(|c| c.id == chat_id)
            .ok_or(ChatError::ChatNotFound)?;

        let title = truncate_title(title);
        let touched = Utc::now();
        self.store
            .update_title(&chat_id, &user.id, &title, touched)
            .await
            .map_err(ChatError::Persist)?;

        let chat = &mut self.chats[idx];
        chat.title = title;
        chat.updated_at = touched;
        self.sort_chats();

        Ok(())
    }

    /// Delete a chat (cascading to its messages at the store) and remove it
    /// locally. Deleting the current chat leaves no selection.
    pub async fn delete_chat(&mut self, chat_id: Uuid) -> Result<(), ChatError> {
        let user = self.gate.require_user()?;
        if !self.chats.iter().any(|c| c.id == chat_id) {
            return Err(ChatError::ChatNotFound);
        }

        self.store
            .delete_chat(&chat_id, &user.id)
            .await
            .map_err(ChatError::Persist)?;

        self.chats.retain(|c| c.id != chat_id);
        if self.current == Some(chat_id) {
            self.current = None;
        }
        Ok(())
    }

    /// Run one full conversation turn.
    ///
    /// Resolves the target chat -- creating one (or titling a still-empty
    /// one) from the message's first 30 characters when needed -- appends
    /// the user message, generates the assistant reply, and appends that
    /// too. The `responding` flag is held for the duration of generation.
    pub async fn send_message<P: LlmProvider>(
        &mut self,
        content: &str,
        responder: &ResponseGenerator<P>,
    ) -> Result<ChatTurn, ChatError> {
        self.gate.require_user()?;
        if self.responding {
            return Err(ChatError::Busy);
        }

        let chat_id = match self
            .current
            .filter(|id| self.chats.iter().any(|c| c.id == *id))
        {
            Some(id) => {
                let is_empty = self
                    .chats
                    .iter()
                    .find(|c| c.id == id)
                    .is_some_and(|c| c.messages.is_empty());
                // First message into a never-used chat adopts the derived title.
                if is_empty {
                    self.rename_chat(id, &derive_title(content)).await?;
                }
                id
            }
            None => self.create_chat(&derive_title(content)).await?.id,
        };

        let history: Vec<ChatMessage> = self
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .map(|c| c.messages.clone())
            .unwrap_or_default();

        let user_message = self
            .append_message(chat_id, content, MessageAuthor::User)
            .await?;

        self.responding = true;
        let reply = responder.generate(content, &history).await;
        let appended = self
            .append_message(chat_id, &reply, MessageAuthor::Assistant)
            .await;
        self.responding = false;

        let assistant_message = appended?;
        Ok(ChatTurn {
            chat_id,
            user_message,
            assistant_message,
        })
    }

    /// Stable sort, most-recently-updated first; ties keep prior order.
    fn sort_chats(&mut self) {
        self.chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }
}
