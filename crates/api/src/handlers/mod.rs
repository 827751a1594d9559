//! Request handlers, one module per resource.

pub mod auth;
pub mod health;
pub mod items;
pub mod outfits;
pub mod profile;
