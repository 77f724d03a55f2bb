use crate::domain::vote::VoteType;
use crate::transport::http::handlers::common::{image_exists, image_not_found, ok, vote_error, ApiResult};
use crate::transport::http::types::{json_422, ApiResponse, AppState, VoteRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/images/{id}/votes",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Vote tally; zero when the ledger is unavailable", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse)
    )
)]
pub async fn get_votes_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if !image_exists(&state, &id).await {
        return image_not_found(&id);
    }
    let tally = state.tally.get_tally(&id).await;
    ok(serde_json::json!({
        "image_id": id,
        "tally": tally,
        "voting_enabled": state.tally.voting_enabled().await,
    }))
}

#[utoipa::path(
    post,
    path = "/api/images/{id}/votes",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded or removed", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse),
        (status = 409, description = "Identity not resolved yet; voting disabled", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 503, description = "Vote ledger unavailable", body = ApiResponse)
    )
)]
pub async fn cast_vote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<VoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"vote_type\": \"up\" | \"down\"}"),
    };
    cast(&state, &id, request.vote_type).await
}

#[utoipa::path(
    post,
    path = "/api/images/{id}/upvote",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Upvote recorded or toggled off", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse),
        (status = 409, description = "Identity not resolved yet; voting disabled", body = ApiResponse),
        (status = 503, description = "Vote ledger unavailable", body = ApiResponse)
    )
)]
pub async fn upvote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    cast(&state, &id, VoteType::Up).await
}

#[utoipa::path(
    post,
    path = "/api/images/{id}/downvote",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Downvote recorded or toggled off", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse),
        (status = 409, description = "Identity not resolved yet; voting disabled", body = ApiResponse),
        (status = 503, description = "Vote ledger unavailable", body = ApiResponse)
    )
)]
pub async fn downvote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    cast(&state, &id, VoteType::Down).await
}

async fn cast(state: &AppState, id: &str, vote_type: VoteType) -> ApiResult {
    if !image_exists(state, id).await {
        return image_not_found(id);
    }
    match state.tally.cast(id, vote_type).await {
        Ok(outcome) => {
            let (title, description) = outcome.notice();
            ok(serde_json::json!({
                "image_id": id,
                "removed": outcome.result.removed,
                "vote_type": outcome.result.vote_type,
                "tally": outcome.tally,
                "notice": { "title": title, "description": description },
            }))
        }
        Err(e) => vote_error(e),
    }
}
