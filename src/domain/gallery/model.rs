//! Image records and the drafts/patches used to create and edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an image's `url` should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// `url` points at a remote image.
    #[default]
    Url,
    /// `url` carries an inline `data:` payload from a file upload.
    Upload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source: ImageSource,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Image fields supplied by the caller when adding an image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub source: ImageSource,
}

impl ImageDraft {
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.title.trim().is_empty() {
            return Err(GalleryError::MissingField("title"));
        }
        if self.url.trim().is_empty() {
            return Err(GalleryError::MissingField("url"));
        }
        Ok(())
    }
}

/// Partial update. `None` leaves the field untouched; `id` and `created_at`
/// cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub source: Option<ImageSource>,
}

impl ImagePatch {
    pub fn validate(&self) -> Result<(), GalleryError> {
        if matches!(self.title.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(GalleryError::MissingField("title"));
        }
        if matches!(self.url.as_deref(), Some(u) if u.trim().is_empty()) {
            return Err(GalleryError::MissingField("url"));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.source.is_none()
    }

    pub(crate) fn apply_to(self, image: &mut Image) {
        if let Some(title) = self.title {
            image.title = title;
        }
        if let Some(description) = self.description {
            image.description = description;
        }
        if let Some(url) = self.url {
            image.url = url;
        }
        if let Some(source) = self.source {
            image.source = source;
        }
    }
}

/// Confirmation shown to the user after a collection mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryNotice {
    pub title: &'static str,
    pub description: &'static str,
}

impl GalleryNotice {
    pub const ADDED: GalleryNotice = GalleryNotice {
        title: "Image added",
        description: "The image has been added to your gallery",
    };
    pub const UPDATED: GalleryNotice = GalleryNotice {
        title: "Image updated",
        description: "The image details have been updated",
    };
    pub const DELETED: GalleryNotice = GalleryNotice {
        title: "Image deleted",
        description: "The image has been removed from your gallery",
    };
}
