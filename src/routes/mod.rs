use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub mod chats;
pub mod documents;
pub mod health;

// Room for multipart boundaries and headers around the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// All API routes with their shared state.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/chats", post(chats::create_chat).get(chats::list_chats))
        .route("/api/chats/{id}", get(chats::get_chat).delete(chats::delete_chat))
        .route("/api/chats/{id}/select", put(chats::select_chat))
        .route("/api/chats/{id}/messages", post(chats::send_message))
        .route("/api/chats/{id}/document", post(documents::upload_to_chat))
        .route("/api/document", post(documents::upload_to_current))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
