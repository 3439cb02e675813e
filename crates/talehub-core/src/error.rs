//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every fallible operation in the workspace surfaces one of these. None of
/// them is fatal to the process; callers report the failure and keep their
/// prior state.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A document was not found at the addressed path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Optimistic concurrency conflict on a story document.
    #[error("revision conflict on {path}: expected {expected}, found {actual}")]
    RevisionConflict {
        /// Path of the document that had the conflict.
        path: String,
        /// The revision the caller expected.
        expected: i64,
        /// The revision actually stored.
        actual: i64,
    },

    /// A required field is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sign-in failed. Unknown email and wrong password are
    /// indistinguishable on purpose.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The blob store rejected or failed an upload.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The backing store is unreachable or misbehaving.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
