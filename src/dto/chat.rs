use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::chat::{Chat, Message};

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatResponse {
    pub id: String,
    pub title: String,
    pub pdf_name: Option<String>,
    pub section_count: usize,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            pdf_name: chat.has_document().then(|| chat.pdf_name.clone()),
            section_count: chat.chunks.len(),
            id: chat.id,
            title: chat.title,
            messages: chat.messages,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    pub pdf_name: Option<String>,
    pub message_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl From<Chat> for ChatSummary {
    fn from(chat: Chat) -> Self {
        Self {
            pdf_name: chat.has_document().then(|| chat.pdf_name.clone()),
            message_count: chat.messages.len(),
            id: chat.id,
            title: chat.title,
            updated_at: chat.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatListResponse {
    pub current_chat_id: Option<String>,
    pub chats: Vec<ChatSummary>,
}
