use utoipa::OpenApi;

use crate::dto::chat::{ChatListResponse, ChatResponse, ChatSummary};
use crate::errors::ErrorResponse;
use crate::routes::chats::SendMessageRequest;
use crate::routes::health::HealthResponse;
use crate::store::chat::{Message, Role};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Chat API",
        version = "0.1.0",
        description = "Chat with an uploaded PDF: chats, document upload and keyword-based answers."
    ),
    paths(
        crate::routes::health::health_check,
        // Chats
        crate::routes::chats::create_chat,
        crate::routes::chats::list_chats,
        crate::routes::chats::get_chat,
        crate::routes::chats::select_chat,
        crate::routes::chats::delete_chat,
        crate::routes::chats::send_message,
        // Documents
        crate::routes::documents::upload_to_chat,
        crate::routes::documents::upload_to_current,
    ),
    components(
        schemas(
            HealthResponse,
            ChatResponse, ChatSummary, ChatListResponse,
            Message, Role, SendMessageRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Chat", description = "Chats and messages"),
        (name = "Documents", description = "PDF upload"),
    )
)]
pub struct ApiDoc;
