//! TaleHub Store — PostgreSQL-backed implementations of the core storage
//! seams.
//!
//! Documents live as one JSONB row per path; blobs are content-addressed
//! rows keyed by the SHA-256 of their bytes. Schema is managed through the
//! workspace `migrations/` directory.

pub mod pg_blob_store;
pub mod pg_document_store;

pub use pg_blob_store::PgBlobStore;
pub use pg_document_store::PgDocumentStore;
