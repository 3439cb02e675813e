//! Test blob stores — in-memory and always-failing `BlobStore`
//! implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use talehub_core::blob::{BlobContent, BlobStore, BlobUpload, StoredBlob};
use talehub_core::error::DomainError;

/// An in-memory blob store. Ids are content-addressed (SHA-256) like the
/// PostgreSQL implementation, so uploading the same bytes twice yields the
/// same id.
#[derive(Debug)]
pub struct MemoryBlobStore {
    base_url: String,
    blobs: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    /// Creates a store that builds URLs from `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the number of stored blobs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    /// Returns `true` if the store holds no blobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a blob with `id` is stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(id)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, DomainError> {
        if upload.bytes.is_empty() {
            return Err(DomainError::Upload(format!(
                "empty file: {}",
                upload.file_name
            )));
        }
        let id = hex::encode(Sha256::digest(&upload.bytes));
        let url = format!("{}/media/{id}", self.base_url);
        self.blobs
            .lock()
            .unwrap()
            .insert(id.clone(), (upload.content_type, upload.bytes));
        Ok(StoredBlob { id, url })
    }

    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>, DomainError> {
        let blobs = self.blobs.lock().unwrap();
        Ok(blobs.get(id).map(|(content_type, bytes)| BlobContent {
            content_type: content_type.clone(),
            bytes: bytes.clone(),
        }))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.blobs.lock().unwrap().remove(id);
        Ok(())
    }
}

/// A blob store that fails every upload and read.
#[derive(Debug, Default)]
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn upload(&self, _upload: BlobUpload) -> Result<StoredBlob, DomainError> {
        Err(DomainError::Upload("storage unavailable".into()))
    }

    async fn fetch(&self, _id: &str) -> Result<Option<BlobContent>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    async fn delete(&self, _id: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}
