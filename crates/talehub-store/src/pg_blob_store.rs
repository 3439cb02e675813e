//! `PostgreSQL` implementation of the `BlobStore` trait.
//!
//! Blobs are content-addressed: the id is the SHA-256 of the bytes, so
//! re-uploading the same file is a no-op and never duplicates storage.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use tracing::debug;

use talehub_core::blob::{BlobContent, BlobStore, BlobUpload, StoredBlob};
use talehub_core::error::DomainError;

fn blob_id(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn blob_url(public_base_url: &str, id: &str) -> String {
    format!("{}/media/{id}", public_base_url.trim_end_matches('/'))
}

/// PostgreSQL-backed blob store.
#[derive(Debug, Clone)]
pub struct PgBlobStore {
    pool: PgPool,
    public_base_url: String,
}

impl PgBlobStore {
    /// Creates a store over an existing pool. Retrieval URLs are built
    /// from `public_base_url`.
    #[must_use]
    pub fn new(pool: PgPool, public_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for PgBlobStore {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, DomainError> {
        if upload.bytes.is_empty() {
            return Err(DomainError::Upload(format!(
                "empty file: {}",
                upload.file_name
            )));
        }

        debug!(
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            "blob upload received"
        );

        let id = blob_id(&upload.bytes);
        sqlx::query(
            r"
INSERT INTO blobs (id, file_name, content_type, bytes)
VALUES ($1, $2, $3, $4)
ON CONFLICT (id) DO NOTHING
",
        )
        .bind(&id)
        .bind(&upload.file_name)
        .bind(&upload.content_type)
        .bind(&upload.bytes)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Upload(format!("blob store: {e}")))?;

        let url = blob_url(&self.public_base_url, &id);
        Ok(StoredBlob { id, url })
    }

    async fn fetch(&self, id: &str) -> Result<Option<BlobContent>, DomainError> {
        let row = sqlx::query("SELECT content_type, bytes FROM blobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("blob store: {e}")))?;

        Ok(row.map(|row| BlobContent {
            content_type: row.get("content_type"),
            bytes: row.get("bytes"),
        }))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM blobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("blob store: {e}")))?;
        Ok(())
    }
}
