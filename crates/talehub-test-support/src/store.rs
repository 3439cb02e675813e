//! Test document stores — in-memory and always-failing `DocumentStore`
//! implementations.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use talehub_core::document::{CollectionPath, DocPath, Document, DocumentStore, WriteOp};
use talehub_core::error::DomainError;

/// An in-memory document store with the same observable semantics as the
/// PostgreSQL one: merge fails on absent documents, `commit` applies all
/// ops or none, listing returns documents in path order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<BTreeMap<String, Value>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    /// Returns `true` if the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn merge_locked(
        docs: &mut BTreeMap<String, Value>,
        path: &DocPath,
        fields: Map<String, Value>,
    ) -> Result<(), DomainError> {
        let existing = docs
            .get_mut(path.as_str())
            .ok_or_else(|| DomainError::NotFound(path.to_string()))?;
        let Value::Object(obj) = existing else {
            return Err(DomainError::Infrastructure(format!(
                "document at {path} is not an object"
            )));
        };
        for (key, value) in fields {
            obj.insert(key, value);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DomainError> {
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .iter()
            .filter_map(|(path, value)| {
                let (parent, id) = path.rsplit_once('/')?;
                (parent == collection.as_str()).then(|| Document {
                    id: id.to_owned(),
                    value: value.clone(),
                })
            })
            .collect())
    }

    async fn get(&self, path: &DocPath) -> Result<Option<Document>, DomainError> {
        let docs = self.docs.lock().unwrap();
        Ok(docs.get(path.as_str()).map(|value| Document {
            id: path.doc_id().to_owned(),
            value: value.clone(),
        }))
    }

    async fn put(&self, path: &DocPath, value: Value) -> Result<(), DomainError> {
        self.docs
            .lock()
            .unwrap()
            .insert(path.as_str().to_owned(), value);
        Ok(())
    }

    async fn merge(&self, path: &DocPath, fields: Map<String, Value>) -> Result<(), DomainError> {
        let mut docs = self.docs.lock().unwrap();
        Self::merge_locked(&mut docs, path, fields)
    }

    async fn delete(&self, path: &DocPath) -> Result<(), DomainError> {
        self.docs.lock().unwrap().remove(path.as_str());
        Ok(())
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), DomainError> {
        let mut docs = self.docs.lock().unwrap();

        // Validate before mutating so a failed batch leaves no partial state.
        for op in &ops {
            if let WriteOp::Merge { path, .. } = op {
                if !docs.contains_key(path.as_str()) {
                    return Err(DomainError::NotFound(path.to_string()));
                }
            }
        }

        for op in ops {
            match op {
                WriteOp::Put { path, value } => {
                    docs.insert(path.as_str().to_owned(), value);
                }
                WriteOp::Merge { path, fields } => {
                    Self::merge_locked(&mut docs, &path, fields)?;
                }
                WriteOp::Delete { path } => {
                    docs.remove(path.as_str());
                }
            }
        }
        Ok(())
    }
}

/// A document store that fails every call with an infrastructure error.
#[derive(Debug, Default)]
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn list(&self, _collection: &CollectionPath) -> Result<Vec<Document>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn get(&self, _path: &DocPath) -> Result<Option<Document>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn put(&self, _path: &DocPath, _value: Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn merge(&self, _path: &DocPath, _fields: Map<String, Value>) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _path: &DocPath) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn commit(&self, _ops: Vec<WriteOp>) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
