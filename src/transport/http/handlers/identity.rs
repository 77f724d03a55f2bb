use crate::transport::http::handlers::common::ok;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/identity",
    responses(
        (status = 200, description = "Identity resolution state; voting is disabled until resolved", body = ApiResponse)
    )
)]
pub async fn identity_handler(State(state): State<AppState>) -> impl IntoResponse {
    let identity = state.tally.identity().await;
    ok(serde_json::json!({
        "resolved": identity.is_some(),
        "identity": identity.as_ref().map(|i| i.as_str()),
        "fallback": identity.as_ref().map(|i| i.is_fallback()).unwrap_or(false),
    }))
}
