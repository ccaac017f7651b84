//! File upload handler.
//!
//! Accepts a multipart form with a single `file` field, validates size and
//! content type, and returns the public URL of the stored blob. Document
//! metadata is attached to a case separately via the cases routes.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::MAX_FILE_SIZE_MB;
use crate::errors::{AppError, AppResult};

/// Public URL of a stored upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// URL under which the file is served
    #[schema(example = "/uploads/6f1c9f9e-8a30-4a41-9f6c-0c2f2b9a7d11.pdf")]
    pub url: String,
}

/// Create upload routes (merged at the router root)
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Upload a document blob
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Uploads",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file, oversized payload, or disallowed type"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(read_error)?;

        let stored = state
            .storage
            .store(&original_name, &content_type, data.to_vec())
            .await?;

        return Ok(Json(UploadResponse { url: stored.url }));
    }

    Err(AppError::validation("No file uploaded"))
}

fn read_error(err: MultipartError) -> AppError {
    map_read_error(err.status(), err.body_text())
}

/// Bodies that trip the router's length limit surface here as a multipart
/// read failure; report them as oversized, not as a generic bad request.
fn map_read_error(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(MAX_FILE_SIZE_MB)
    } else {
        AppError::validation(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_limited_read_reports_payload_too_large() {
        let err = map_read_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "length limit exceeded".to_string(),
        );
        assert!(matches!(err, AppError::PayloadTooLarge(MAX_FILE_SIZE_MB)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_multipart_stays_a_validation_error() {
        let err = map_read_error(
            StatusCode::BAD_REQUEST,
            "Invalid multipart boundary".to_string(),
        );
        assert!(matches!(err, AppError::Validation(_)));
    }
}
