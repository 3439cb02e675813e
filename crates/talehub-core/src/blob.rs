//! Blob store abstraction.
//!
//! Cover images are uploaded once and referenced by URL from story
//! documents. The store accepts raw bytes and returns a durable retrieval
//! URL.

use async_trait::async_trait;

use crate::error::DomainError;

/// A file handed to the blob store for upload.
#[derive(Debug, Clone)]
pub struct BlobUpload {
    /// Original file name, kept for diagnostics only.
    pub file_name: String,
    /// MIME type served back on retrieval.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Stable blob identifier.
    pub id: String,
    /// Durable retrieval URL.
    pub url: String,
}

/// A blob as served back to a reader.
#[derive(Debug, Clone)]
pub struct BlobContent {
    /// MIME type recorded at upload.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Uploads a file, returns a retrievable URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `upload` and returns its id and retrieval URL.
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, DomainError>;

    /// Fetches a stored blob by id, or `None` if absent.
    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>, DomainError>;

    /// Deletes a stored blob. Deleting an absent blob is not an error.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
