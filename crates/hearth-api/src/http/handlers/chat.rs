//! Chat HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/chats             - List the caller's chats, newest first
//! - POST   /api/v1/chats             - Create a chat
//! - POST   /api/v1/chats/{id}/select - Make a chat current
//! - PUT    /api/v1/chats/{id}        - Rename a chat
//! - DELETE /api/v1/chats/{id}        - Delete a chat and its messages
//! - POST   /api/v1/messages          - Send a message and get the reply
//!
//! Every handler locks the caller's manager for the duration of the
//! request, so mutations for one user are strictly sequential.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_types::chat::{Chat, ChatMessage};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameChatRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// The chat list as presented to the client.
#[derive(Debug, Serialize)]
pub struct ChatListView {
    pub chats: Vec<Chat>,
    pub current_chat_id: Option<Uuid>,
}

/// One completed turn as presented to the client.
#[derive(Debug, Serialize)]
pub struct TurnView {
    pub chat_id: Uuid,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/chats - Refresh from the store and list the caller's chats.
pub async fn list_chats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<ChatListView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    manager.load_all().await?;

    let view = ChatListView {
        chats: manager.chats().to_vec(),
        current_chat_id: manager.current_id(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(view, request_id, elapsed).with_link("self", "/api/v1/chats");
    Ok(Json(resp))
}

/// POST /api/v1/chats - Create a chat and make it current.
pub async fn create_chat(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<CreateChatRequest>,
) -> Result<Json<ApiResponse<Chat>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    let chat = manager.create_chat(&body.title).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let link = format!("/api/v1/chats/{}", chat.id);
    let resp = ApiResponse::success(chat, request_id, elapsed).with_link("self", &link);
    Ok(Json(resp))
}

/// POST /api/v1/chats/{id}/select - Make a chat the current one.
pub async fn select_chat(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<ChatListView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let chat_id = parse_uuid(&chat_id)?;

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    if !manager.chats().iter().any(|c| c.id == chat_id) {
        return Err(AppError::Chat(hearth_types::error::ChatError::ChatNotFound));
    }
    manager.select_chat(Some(chat_id));

    let view = ChatListView {
        chats: manager.chats().to_vec(),
        current_chat_id: manager.current_id(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// PUT /api/v1/chats/{id} - Rename a chat.
pub async fn rename_chat(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(chat_id): Path<String>,
    Json(body): Json<RenameChatRequest>,
) -> Result<Json<ApiResponse<ChatListView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let chat_id = parse_uuid(&chat_id)?;
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    manager.rename_chat(chat_id, &body.title).await?;

    let view = ChatListView {
        chats: manager.chats().to_vec(),
        current_chat_id: manager.current_id(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// DELETE /api/v1/chats/{id} - Delete a chat and its messages.
pub async fn delete_chat(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<ChatListView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let chat_id = parse_uuid(&chat_id)?;

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    manager.delete_chat(chat_id).await?;

    let view = ChatListView {
        chats: manager.chats().to_vec(),
        current_chat_id: manager.current_id(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/messages - Send a message as one full conversation turn.
///
/// Targets the current chat; with no selection a chat is created and titled
/// from the message's first 30 characters. The response carries both sides
/// of the turn.
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<TurnView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Message content must not be empty".to_string(),
        ));
    }

    let manager = state.manager_for(&current.user).await?;
    let mut manager = manager.lock().await;
    let turn = manager
        .send_message(&body.content, &state.responder)
        .await?;

    let view = TurnView {
        chat_id: turn.chat_id,
        user_message: turn.user_message,
        assistant_message: turn.assistant_message,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let link = format!("/api/v1/chats/{}", view.chat_id);
    let resp = ApiResponse::success(view, request_id, elapsed).with_link("chat", &link);
    Ok(Json(resp))
}
