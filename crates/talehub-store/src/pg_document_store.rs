//! `PostgreSQL` implementation of the `DocumentStore` trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Row};

use talehub_core::document::{CollectionPath, DocPath, Document, DocumentStore, WriteOp};
use talehub_core::error::DomainError;

const PUT_SQL: &str = r"
INSERT INTO documents (path, parent, doc_id, value, updated_at)
VALUES ($1, $2, $3, $4, NOW())
ON CONFLICT (path) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
";

// JSONB || overwrites only the supplied top-level fields.
const MERGE_SQL: &str = r"
UPDATE documents SET value = value || $2, updated_at = NOW() WHERE path = $1
";

const DELETE_SQL: &str = "DELETE FROM documents WHERE path = $1";

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("document store: {e}"))
}

/// PostgreSQL-backed document store.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a store over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query("SELECT doc_id, value FROM documents WHERE parent = $1 ORDER BY path")
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;

        Ok(rows
            .into_iter()
            .map(|row| Document {
                id: row.get("doc_id"),
                value: row.get("value"),
            })
            .collect())
    }

    async fn get(&self, path: &DocPath) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query("SELECT value FROM documents WHERE path = $1")
            .bind(path.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;

        Ok(row.map(|row| Document {
            id: path.doc_id().to_owned(),
            value: row.get("value"),
        }))
    }

    async fn put(&self, path: &DocPath, value: Value) -> Result<(), DomainError> {
        sqlx::query(PUT_SQL)
            .bind(path.as_str())
            .bind(path.parent())
            .bind(path.doc_id())
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn merge(&self, path: &DocPath, fields: Map<String, Value>) -> Result<(), DomainError> {
        let result = sqlx::query(MERGE_SQL)
            .bind(path.as_str())
            .bind(Value::Object(fields))
            .execute(&self.pool)
            .await
            .map_err(infra)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(path.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> Result<(), DomainError> {
        sqlx::query(DELETE_SQL)
            .bind(path.as_str())
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infra)?;

        for op in ops {
            match op {
                WriteOp::Put { path, value } => {
                    sqlx::query(PUT_SQL)
                        .bind(path.as_str().to_owned())
                        .bind(path.parent().to_owned())
                        .bind(path.doc_id().to_owned())
                        .bind(value)
                        .execute(&mut *tx)
                        .await
                        .map_err(infra)?;
                }
                WriteOp::Merge { path, fields } => {
                    let result = sqlx::query(MERGE_SQL)
                        .bind(path.as_str().to_owned())
                        .bind(Value::Object(fields))
                        .execute(&mut *tx)
                        .await
                        .map_err(infra)?;
                    if result.rows_affected() == 0 {
                        // Rolls back the whole batch on drop.
                        return Err(DomainError::NotFound(path.to_string()));
                    }
                }
                WriteOp::Delete { path } => {
                    sqlx::query(DELETE_SQL)
                        .bind(path.as_str().to_owned())
                        .execute(&mut *tx)
                        .await
                        .map_err(infra)?;
                }
            }
        }

        tx.commit().await.map_err(infra)
    }
}
