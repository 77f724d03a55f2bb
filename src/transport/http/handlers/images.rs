use crate::domain::gallery::GalleryNotice;
use crate::transport::http::handlers::common::{gallery_error, image_not_found, ok};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, CreateImageRequest, UpdateImageRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/images",
    responses(
        (status = 200, description = "All images, newest additions first", body = ApiResponse)
    )
)]
pub async fn list_images_handler(State(state): State<AppState>) -> impl IntoResponse {
    let images = state.images.read().await;
    ok(serde_json::json!({
        "images": images.list(),
        "total": images.len(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/images",
    request_body = CreateImageRequest,
    responses(
        (status = 200, description = "Image added", body = ApiResponse),
        (status = 400, description = "Missing title or url", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_image_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateImageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"title\", \"url\", \"description\"?, \"source\"?}"),
    };

    let mut images = state.images.write().await;
    match images.add(request.into()) {
        Ok(image) => {
            info!("{}: {} ({})", GalleryNotice::ADDED.title, image.title, image.id);
            ok(serde_json::json!({
                "image": image,
                "total": images.len(),
                "notice": GalleryNotice::ADDED,
            }))
        }
        Err(e) => gallery_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Image found", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse)
    )
)]
pub async fn get_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let images = state.images.read().await;
    match images.get(&id) {
        Some(image) => ok(serde_json::json!({ "image": image })),
        None => image_not_found(&id),
    }
}

#[utoipa::path(
    put,
    path = "/api/images/{id}",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Image updated", body = ApiResponse),
        (status = 400, description = "Update would blank title or url", body = ApiResponse),
        (status = 404, description = "No image with this id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateImageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"title\"?, \"description\"?, \"url\"?, \"source\"?}"),
    };

    let mut images = state.images.write().await;
    match images.update(&id, request.into()) {
        Ok(Some(image)) => {
            info!("{}: {}", GalleryNotice::UPDATED.title, image.id);
            ok(serde_json::json!({
                "image": image,
                "notice": GalleryNotice::UPDATED,
            }))
        }
        Ok(None) => image_not_found(&id),
        Err(e) => gallery_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/images/{id}",
    params(
        ("id" = String, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Image removed (or already absent)", body = ApiResponse)
    )
)]
pub async fn delete_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let removed = state.images.write().await.delete(&id);
    if removed.is_some() {
        info!("{}: {}", GalleryNotice::DELETED.title, id);
        state.tally.forget(&id).await;
    }
    ok(serde_json::json!({
        "id": id,
        "deleted": removed.is_some(),
        "notice": GalleryNotice::DELETED,
    }))
}
