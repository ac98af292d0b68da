use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not extract text from the PDF. Please try another file.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    #[error("Text extraction failed: {0:#}")]
    Extraction(anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::FeatureDisabled(msg) => format!("Feature disabled: {msg}"),
            AppError::Extraction(e) => {
                tracing::warn!("Text extraction failed: {e:#}");
                EXTRACTION_FAILED_MESSAGE.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                "Internal server error".to_string()
            }
        };

        let body = axum::Json(ErrorResponse {
            error: message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("Chat not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Extraction(anyhow::anyhow!("bad xref")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = AppError::Internal(anyhow::anyhow!("secret path /var/x")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Validation("Message cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
