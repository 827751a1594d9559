//! Domain layer for the Ducki wardrobe service.
//!
//! Pure types and logic shared by the database and HTTP layers: the error
//! taxonomy, the category vocabulary, the closet filter/sort engine, and
//! media-kind classification. This crate performs no I/O.

pub mod category;
pub mod closet;
pub mod error;
pub mod media;
pub mod types;
