use crate::transport::http::handlers::{health, identity, images, votes};
use crate::transport::http::types::{ApiResponse, CreateImageRequest, UpdateImageRequest, VoteRequest};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        identity::identity_handler,
        images::list_images_handler,
        images::create_image_handler,
        images::get_image_handler,
        images::update_image_handler,
        images::delete_image_handler,
        votes::get_votes_handler,
        votes::cast_vote_handler,
        votes::upvote_handler,
        votes::downvote_handler
    ),
    components(schemas(
        ApiResponse,
        CreateImageRequest,
        UpdateImageRequest,
        VoteRequest
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/identity", get(identity::identity_handler))
        .route(
            "/api/images",
            get(images::list_images_handler).post(images::create_image_handler),
        )
        .route(
            "/api/images/:id",
            get(images::get_image_handler)
                .put(images::update_image_handler)
                .delete(images::delete_image_handler),
        )
        .route(
            "/api/images/:id/votes",
            get(votes::get_votes_handler).post(votes::cast_vote_handler),
        )
        .route("/api/images/:id/upvote", post(votes::upvote_handler))
        .route("/api/images/:id/downvote", post(votes::downvote_handler))
        .with_state(app_state)
}
