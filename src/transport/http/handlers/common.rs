use crate::app::VoteError;
use crate::domain::gallery::GalleryError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

pub type ApiResult = (StatusCode, Json<ApiResponse>);

pub fn ok(data: JsonValue) -> ApiResult {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }),
    )
}

pub fn error(status: StatusCode, message: impl Into<String>) -> ApiResult {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
}

pub fn image_not_found(id: &str) -> ApiResult {
    error(StatusCode::NOT_FOUND, format!("Image '{}' not found", id))
}

pub fn gallery_error(err: GalleryError) -> ApiResult {
    error(StatusCode::BAD_REQUEST, err.to_string())
}

/// Unresolved identity is a disabled action (409), not a server fault.
pub fn vote_error(err: VoteError) -> ApiResult {
    match err {
        VoteError::IdentityUnresolved => (
            StatusCode::CONFLICT,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "code": "IDENTITY_UNRESOLVED" })),
                error: Some(err.to_string()),
            }),
        ),
        VoteError::LedgerUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "code": "LEDGER_UNAVAILABLE" })),
                error: Some(err.to_string()),
            }),
        ),
    }
}

/// Checks the image exists without holding the collection lock afterwards.
pub async fn image_exists(state: &AppState, id: &str) -> bool {
    state.images.read().await.contains(id)
}
