//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods over user-owned
//! tables additionally take the owning user's id and scope every query by it.

pub mod item_repo;
pub mod outfit_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use outfit_repo::OutfitRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
