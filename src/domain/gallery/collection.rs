//! The process-local image collection.
//!
//! Images are kept in display order: `add` places the new image first, seeded
//! images keep the order they were given in. Nothing is persisted.

use crate::domain::gallery::model::{GalleryError, Image, ImageDraft, ImagePatch};
use crate::domain::token::random_base36;
use chrono::Utc;

const ID_LEN: usize = 7;

#[derive(Debug, Default)]
pub struct ImageCollection {
    images: Vec<Image>,
}

impl ImageCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Creates a collection holding `images`, in the given order.
    ///
    /// Later duplicates of an id are dropped so ids stay unique.
    pub fn with_seed(images: Vec<Image>) -> Self {
        let mut collection = Self::new();
        for image in images {
            if collection.get(&image.id).is_none() {
                collection.images.push(image);
            }
        }
        collection
    }

    /// Adds a new image at the front of the collection and returns it.
    pub fn add(&mut self, draft: ImageDraft) -> Result<Image, GalleryError> {
        draft.validate()?;
        let image = Image {
            id: self.generate_id(),
            title: draft.title,
            description: draft.description,
            url: draft.url,
            created_at: Utc::now(),
            source: draft.source,
        };
        self.images.insert(0, image.clone());
        Ok(image)
    }

    /// Merges `patch` into the image with `id`.
    ///
    /// Returns `Ok(None)` and leaves the collection untouched if no such image exists.
    pub fn update(&mut self, id: &str, patch: ImagePatch) -> Result<Option<Image>, GalleryError> {
        patch.validate()?;
        match self.images.iter_mut().find(|image| image.id == id) {
            Some(image) => {
                patch.apply_to(image);
                Ok(Some(image.clone()))
            }
            None => Ok(None),
        }
    }

    /// Removes the image with `id`, returning it if it was present.
    pub fn delete(&mut self, id: &str) -> Option<Image> {
        let idx = self.images.iter().position(|image| image.id == id)?;
        Some(self.images.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn list(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn generate_id(&self) -> String {
        loop {
            let id = random_base36(ID_LEN);
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
