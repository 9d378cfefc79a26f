/// Domain error taxonomy.
///
/// Only the service layer constructs these; the store and repository layers
/// hand back raw driver errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Duplicate of an existing live record. Surfaced with the bad-request code.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
