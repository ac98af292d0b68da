use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::dto::chat::{ChatListResponse, ChatResponse, ChatSummary};
use crate::errors::AppError;
use crate::retrieval::respond;
use crate::store::chat::{Message, Role};
use crate::state::AppState;

fn chat_not_found() -> AppError {
    AppError::NotFound("Chat not found".to_string())
}

// ── Chats CRUD ──────────────────────────────────────────────

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/chats", tag = "Chat", responses((status = 200, body = ChatResponse))))]
pub async fn create_chat(State(state): State<AppState>) -> Result<Json<ChatResponse>, AppError> {
    let chat = state.chats.create()?;
    Ok(Json(chat.into()))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/api/chats", tag = "Chat", responses((status = 200, body = ChatListResponse))))]
pub async fn list_chats(State(state): State<AppState>) -> Result<Json<ChatListResponse>, AppError> {
    let chats = state.chats.list()?;
    Ok(Json(ChatListResponse {
        current_chat_id: state.chats.current_id()?,
        chats: chats.into_iter().map(ChatSummary::from).collect(),
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/api/chats/{id}", tag = "Chat", params(("id" = String, Path, description = "Chat ID")), responses((status = 200, body = ChatResponse))))]
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatResponse>, AppError> {
    let chat = state.chats.get(&id)?.ok_or_else(chat_not_found)?;
    Ok(Json(chat.into()))
}

#[cfg_attr(feature = "openapi", utoipa::path(put, path = "/api/chats/{id}/select", tag = "Chat", params(("id" = String, Path, description = "Chat ID")), responses((status = 200, body = ChatResponse))))]
pub async fn select_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatResponse>, AppError> {
    if !state.chats.select(&id)? {
        return Err(chat_not_found());
    }
    let chat = state.chats.get(&id)?.ok_or_else(chat_not_found)?;
    Ok(Json(chat.into()))
}

#[cfg_attr(feature = "openapi", utoipa::path(delete, path = "/api/chats/{id}", tag = "Chat", params(("id" = String, Path, description = "Chat ID")), responses((status = 200))))]
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    if !state.chats.delete(&id)? {
        return Err(chat_not_found());
    }
    Ok(())
}

// ── Send Message ────────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendMessageRequest {
    pub message: String,
}

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/chats/{id}/messages", tag = "Chat", params(("id" = String, Path, description = "Chat ID")), request_body = SendMessageRequest, responses((status = 200, body = Message))))]
pub async fn send_message(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    state
        .chats
        .add_message(&chat_id, Role::User, &payload.message)?
        .ok_or_else(chat_not_found)?;

    let delay = state.pacer.delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    // The chat may have been deleted or given a new document while waiting
    let document = state.chats.document(&chat_id)?.ok_or_else(chat_not_found)?;
    let answer = respond(&payload.message, &document.text, document.chunks.as_slice());

    let reply = state
        .chats
        .add_message(&chat_id, Role::Assistant, &answer)?
        .ok_or_else(chat_not_found)?;

    Ok(Json(reply))
}
