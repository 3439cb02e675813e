//! Document store abstraction.
//!
//! The backing store is a path-addressed document database under a
//! hierarchical namespace (`stories/{id}`, `users/{uid}/myStories/{id}`,
//! ...). This module defines the path types, the stored document shape,
//! and the `DocumentStore` trait every storage backend implements.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DomainError;

/// Path of a collection of documents, e.g. `users/{uid}/myStories`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Creates a collection path from its slash-separated form.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path of the document `id` within this collection.
    #[must_use]
    pub fn doc(&self, id: &str) -> DocPath {
        DocPath(format!("{}/{id}", self.0))
    }

    /// Returns the slash-separated path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of a single document, e.g. `users/{uid}/myStories/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath(String);

impl DocPath {
    /// Returns the slash-separated path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path of the collection containing this document.
    ///
    /// # Panics
    ///
    /// Never panics: a `DocPath` is only constructed through
    /// [`CollectionPath::doc`], so it always contains a separator.
    #[must_use]
    pub fn parent(&self) -> &str {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }

    /// Returns the document id, the final path segment.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        self.0
            .rsplit_once('/')
            .map_or(self.0.as_str(), |(_, id)| id)
    }
}

impl std::fmt::Display for DocPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as returned by the store.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document id (final path segment).
    pub id: String,
    /// The document body.
    pub value: Value,
}

impl Document {
    /// Deserializes the document body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the stored shape does not
    /// match `T` — a stored document that fails to decode is corrupt state,
    /// not caller error.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.value.clone())
            .map_err(|e| DomainError::Infrastructure(format!("document decode failed: {e}")))
    }
}

/// One write in an atomic batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Create or fully overwrite the document at `path`.
    Put {
        /// Target document path.
        path: DocPath,
        /// Full document body.
        value: Value,
    },
    /// Merge `fields` into the top level of an existing document.
    Merge {
        /// Target document path.
        path: DocPath,
        /// Top-level fields to overwrite; other fields are untouched.
        fields: Map<String, Value>,
    },
    /// Delete the document at `path`, if present.
    Delete {
        /// Target document path.
        path: DocPath,
    },
}

/// Path-addressed document read/write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists all documents in a collection, in the store's natural order.
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DomainError>;

    /// Fetches the document at `path`, or `None` if absent.
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, DomainError>;

    /// Creates or fully overwrites the document at `path`.
    async fn put(&self, path: &DocPath, value: Value) -> Result<(), DomainError>;

    /// Merges `fields` into the top level of the document at `path`.
    ///
    /// Fails with `DomainError::NotFound` if the document does not exist;
    /// a partial update never implicitly creates a document.
    async fn merge(&self, path: &DocPath, fields: Map<String, Value>) -> Result<(), DomainError>;

    /// Deletes the document at `path`. Deleting an absent document is not
    /// an error.
    async fn delete(&self, path: &DocPath) -> Result<(), DomainError>;

    /// Applies all writes atomically: either every op lands or none does.
    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), DomainError>;
}
