//! In-memory image collection.

pub mod collection;
pub mod model;
pub mod seed;

pub use collection::ImageCollection;
pub use model::{GalleryError, GalleryNotice, Image, ImageDraft, ImagePatch, ImageSource};
