//! Row models and DTOs, one module per aggregate.

pub mod item;
pub mod outfit;
pub mod profile;
pub mod session;
pub mod user;
