use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::retrieval::generate_chat_title;

pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

pub const WELCOME_MESSAGE: &str = "Hello! I'm your PDF assistant. Upload a PDF document using the sidebar, and I'll help you find information within it. Just ask me any question about the content!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A chat session and the document it was given, if any.
#[derive(Debug, Clone)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub pdf_name: String,
    pub pdf_text: String,
    pub chunks: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_CHAT_TITLE.to_string(),
            messages: vec![Message::new(Role::Assistant, WELCOME_MESSAGE)],
            pdf_name: String::new(),
            pdf_text: String::new(),
            chunks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_document(&self) -> bool {
        !self.pdf_name.is_empty()
    }
}

/// The extracted text of a chat's document and its retrieval chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub chunks: Vec<String>,
}

pub fn upload_confirmation(file_name: &str, section_count: usize) -> String {
    format!(
        "I've loaded \"{file_name}\" successfully! It contains {section_count} sections of content. Feel free to ask me anything about the document."
    )
}

#[derive(Default)]
struct Inner {
    chats: HashMap<String, Chat>,
    // creation order, oldest first
    order: Vec<String>,
    current: Option<String>,
}

/// In-memory chat sessions keyed by id, plus the currently selected chat.
///
/// Cloning the store hands out another handle to the same sessions.
#[derive(Clone, Default)]
pub struct ChatStore {
    inner: Arc<RwLock<Inner>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| anyhow!("Chat store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| anyhow!("Chat store lock poisoned"))
    }

    /// Create an empty chat and make it the current one.
    pub fn create(&self) -> Result<Chat> {
        let chat = Chat::new();
        let mut inner = self.write()?;
        inner.order.push(chat.id.clone());
        inner.current = Some(chat.id.clone());
        inner.chats.insert(chat.id.clone(), chat.clone());
        tracing::info!("Created chat {}", chat.id);
        Ok(chat)
    }

    /// All chats, most recently updated first.
    pub fn list(&self) -> Result<Vec<Chat>> {
        let inner = self.read()?;
        let mut chats: Vec<Chat> = inner
            .order
            .iter()
            .filter_map(|id| inner.chats.get(id).cloned())
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    pub fn get(&self, id: &str) -> Result<Option<Chat>> {
        Ok(self.read()?.chats.get(id).cloned())
    }

    pub fn current_id(&self) -> Result<Option<String>> {
        Ok(self.read()?.current.clone())
    }

    /// Make `id` the current chat. Returns false when no such chat exists.
    pub fn select(&self, id: &str) -> Result<bool> {
        let mut inner = self.write()?;
        if !inner.chats.contains_key(id) {
            return Ok(false);
        }
        inner.current = Some(id.to_string());
        Ok(true)
    }

    /// Remove a chat. When it was current, the oldest remaining chat takes
    /// its place. Returns false when no such chat exists.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut inner = self.write()?;
        if inner.chats.remove(id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|existing| existing != id);
        if inner.current.as_deref() == Some(id) {
            let fallback = inner.order.first().cloned();
            inner.current = fallback;
        }
        tracing::info!("Deleted chat {id}");
        Ok(true)
    }

    /// Store an extracted document on a chat, retitle the chat after the
    /// file and post the upload confirmation.
    pub fn attach_document(
        &self,
        id: &str,
        file_name: &str,
        text: String,
        chunks: Vec<String>,
    ) -> Result<Option<Chat>> {
        let mut inner = self.write()?;
        let Some(chat) = inner.chats.get_mut(id) else {
            return Ok(None);
        };

        chat.title = generate_chat_title(file_name);
        chat.pdf_name = file_name.to_string();
        chat.pdf_text = text;
        chat.messages.push(Message::new(
            Role::Assistant,
            upload_confirmation(file_name, chunks.len()),
        ));
        chat.chunks = chunks;
        chat.updated_at = Utc::now();

        tracing::info!(
            "Attached '{file_name}' to chat {id} ({} chunks)",
            chat.chunks.len()
        );
        Ok(Some(chat.clone()))
    }

    pub fn add_message(&self, id: &str, role: Role, content: &str) -> Result<Option<Message>> {
        let mut inner = self.write()?;
        let Some(chat) = inner.chats.get_mut(id) else {
            return Ok(None);
        };

        let message = Message::new(role, content);
        chat.messages.push(message.clone());
        chat.updated_at = message.created_at;
        Ok(Some(message))
    }

    /// A chat's document, copied out so no lock is held while answering.
    /// Chats without a document yield an empty one.
    pub fn document(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.read()?.chats.get(id).map(|chat| Document {
            text: chat.pdf_text.clone(),
            chunks: chat.chunks.clone(),
        }))
    }
}
