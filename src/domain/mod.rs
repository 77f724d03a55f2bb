//! Domain types for the gallery: images and the votes cast on them.

pub mod gallery;
pub mod identity;
pub mod token;
pub mod vote;
