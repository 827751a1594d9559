use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Carried up to the HTTP layer, where each variant maps to a status code.
/// A row that exists but belongs to another user is reported as [`NotFound`]:
/// ownership scoping makes the two cases indistinguishable.
///
/// [`NotFound`]: CoreError::NotFound
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is not owned by the caller).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
