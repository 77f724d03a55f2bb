use crate::app::VoteTallyService;
use crate::domain::gallery::{ImageCollection, ImageDraft, ImagePatch, ImageSource};
use crate::domain::vote::VoteType;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub images: Arc<RwLock<ImageCollection>>,
    pub tally: Arc<VoteTallyService>,
}

impl AppState {
    pub fn new(images: ImageCollection, tally: Arc<VoteTallyService>) -> Self {
        Self {
            images: Arc::new(RwLock::new(images)),
            tally,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateImageRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Remote URL, or a `data:` payload when `source` is `upload`.
    pub url: String,
    /// `url` (default) or `upload`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "url")]
    pub source: ImageSource,
}

impl From<CreateImageRequest> for ImageDraft {
    fn from(req: CreateImageRequest) -> Self {
        ImageDraft {
            title: req.title,
            description: req.description,
            url: req.url,
            source: req.source,
        }
    }
}

/// Partial update; omitted fields are left unchanged.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateImageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "upload")]
    pub source: Option<ImageSource>,
}

impl From<UpdateImageRequest> for ImagePatch {
    fn from(req: UpdateImageRequest) -> Self {
        ImagePatch {
            title: req.title,
            description: req.description,
            url: req.url,
            source: req.source,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct VoteRequest {
    /// `up` or `down`.
    #[schema(value_type = String, example = "up")]
    pub vote_type: VoteType,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
