use std::time::Duration;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::dto::chat::ChatResponse;
use crate::errors::AppError;
use crate::retrieval::prepare_chunks;
use crate::services::pdf;
use crate::state::AppState;

const UNNAMED_UPLOAD: &str = "unnamed.pdf";

struct PdfUpload {
    filename: String,
    data: Vec<u8>,
}

/// Upload a PDF into the given chat.
#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/chats/{id}/document", tag = "Documents", params(("id" = String, Path, description = "Chat ID")), responses((status = 200, body = ChatResponse), (status = 422, body = crate::errors::ErrorResponse))))]
pub async fn upload_to_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ChatResponse>, AppError> {
    let upload = read_upload(&state, multipart).await?;

    if state.chats.get(&chat_id)?.is_none() {
        return Err(AppError::NotFound("Chat not found".to_string()));
    }

    ingest(&state, &chat_id, upload).await
}

/// Upload a PDF into the current chat, starting a new chat when none is
/// selected.
#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/api/document", tag = "Documents", responses((status = 200, body = ChatResponse), (status = 422, body = crate::errors::ErrorResponse))))]
pub async fn upload_to_current(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ChatResponse>, AppError> {
    let upload = read_upload(&state, multipart).await?;

    let current = match state.chats.current_id()? {
        Some(id) => id,
        None => state.chats.create()?.id,
    };

    ingest(&state, &current, upload).await
}

async fn read_upload(state: &AppState, mut multipart: Multipart) -> Result<PdfUpload, AppError> {
    if !state.config.features.pdf_upload_enabled {
        return Err(AppError::FeatureDisabled("PDF upload".to_string()));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let filename = upload_file_name(field.file_name());
    let content_type = field.content_type().unwrap_or("application/pdf").to_string();

    if !pdf::is_pdf(&content_type, &filename) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

    let max = state.config.max_upload_bytes();
    if data.len() > max {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {} MB",
            max / 1024 / 1024
        )));
    }

    Ok(PdfUpload {
        filename,
        data: data.to_vec(),
    })
}

/// Missing and blank multipart file names both fall back to a placeholder,
/// so a stored document always has a name.
fn upload_file_name(name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_UPLOAD)
        .to_string()
}

/// Extract, chunk and attach. The chat is left untouched when extraction
/// fails.
async fn ingest(state: &AppState, chat_id: &str, upload: PdfUpload) -> Result<Json<ChatResponse>, AppError> {
    let timeout = Duration::from_secs(state.config.upload.extraction_timeout_secs);
    let text = pdf::extract_text(upload.data, &upload.filename, timeout)
        .await
        .map_err(AppError::Extraction)?;

    let chunks = prepare_chunks(&text, state.config.retrieval.chunk_size);
    tracing::info!(
        "'{}' split into {} chunks for chat {chat_id}",
        upload.filename,
        chunks.len()
    );

    let chat = state
        .chats
        .attach_document(chat_id, &upload.filename, text, chunks)?
        .ok_or_else(|| AppError::NotFound("Chat not found".to_string()))?;

    Ok(Json(chat.into()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use std::sync::Arc;

    use super::upload_file_name;
    use crate::config::test_config;
    use crate::errors::EXTRACTION_FAILED_MESSAGE;
    use crate::routes::router;
    use crate::routes::test_support::test_state;
    use crate::services::pacing::FixedPacer;
    use crate::state::AppState;
    use crate::store::chat::upload_confirmation;

    const FIXTURE_TEXT: &str = "Deadlock happens when processes wait forever";

    /// A one-page PDF showing `text` in Helvetica, with a valid xref table.
    fn fixture_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    fn state_with_chunk_size(chunk_size: usize) -> AppState {
        let mut config = test_config();
        config.retrieval.chunk_size = chunk_size;
        AppState::with_pacer(config, Arc::new(FixedPacer::default()))
    }

    const BOUNDARY: &str = "----pdfchattestboundary";

    fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn upload(state: &AppState, uri: &str, filename: &str, content_type: &str, data: &[u8]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(filename, content_type, data)))
            .unwrap();

        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_upload_file_name_fallback() {
        assert_eq!(upload_file_name(Some("Guide.pdf")), "Guide.pdf");
        assert_eq!(upload_file_name(Some("")), "unnamed.pdf");
        assert_eq!(upload_file_name(Some("   ")), "unnamed.pdf");
        assert_eq!(upload_file_name(None), "unnamed.pdf");
    }

    #[tokio::test]
    async fn test_pdf_upload_attaches_document() {
        let state = state_with_chunk_size(2);
        let chat = state.chats.create().unwrap();

        let uri = format!("/api/chats/{}/document", chat.id);
        let (status, body) = upload(&state, &uri, "Field Guide.pdf", "application/pdf", &fixture_pdf(FIXTURE_TEXT)).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["title"], "Field Guide");
        assert_eq!(body["pdf_name"], "Field Guide.pdf");

        let document = state.chats.document(&chat.id).unwrap().unwrap();
        assert!(document.text.contains("Deadlock"), "{:?}", document.text);
        let sections = document.text.split_whitespace().count().div_ceil(2);
        assert!(sections > 0);
        assert_eq!(body["section_count"], sections);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1]["content"],
            upload_confirmation("Field Guide.pdf", sections)
        );
    }

    #[tokio::test]
    async fn test_blank_file_name_is_replaced() {
        let state = test_state();
        let chat = state.chats.create().unwrap();

        let uri = format!("/api/chats/{}/document", chat.id);
        let (status, body) = upload(&state, &uri, "", "application/pdf", &fixture_pdf(FIXTURE_TEXT)).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["pdf_name"], "unnamed.pdf");
        assert_eq!(body["title"], "unnamed");
        assert!(state.chats.get(&chat.id).unwrap().unwrap().has_document());
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let state = test_state();
        let chat = state.chats.create().unwrap();

        let uri = format!("/api/chats/{}/document", chat.id);
        let (status, body) = upload(&state, &uri, "notes.txt", "text/plain", b"hello").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Only PDF files are supported");
    }

    #[tokio::test]
    async fn test_failed_extraction_leaves_chat_untouched() {
        let state = test_state();
        let chat = state.chats.create().unwrap();

        let uri = format!("/api/chats/{}/document", chat.id);
        let (status, body) = upload(&state, &uri, "broken.pdf", "application/pdf", b"not really a pdf").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], EXTRACTION_FAILED_MESSAGE);

        let stored = state.chats.get(&chat.id).unwrap().unwrap();
        assert_eq!(stored.title, "New Chat");
        assert!(stored.chunks.is_empty());
        assert_eq!(stored.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_to_unknown_chat() {
        let state = test_state();
        let (status, _) = upload(&state, "/api/chats/missing/document", "a.pdf", "application/pdf", b"%PDF-1.4").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_to_current_creates_chat_when_none() {
        let state = test_state();
        assert_eq!(state.chats.current_id().unwrap(), None);

        let (status, _) = upload(&state, "/api/document", "broken.pdf", "application/pdf", b"garbage").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let current = state.chats.current_id().unwrap().expect("chat created");
        assert!(state.chats.get(&current).unwrap().unwrap().chunks.is_empty());
    }

    #[tokio::test]
    async fn test_upload_disabled() {
        let mut config = test_config();
        config.features.pdf_upload_enabled = false;
        let state = AppState::with_pacer(config, Arc::new(FixedPacer::default()));

        let (status, _) = upload(&state, "/api/document", "a.pdf", "application/pdf", b"%PDF").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
