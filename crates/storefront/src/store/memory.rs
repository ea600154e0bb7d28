//! In-memory storage providers.
//!
//! [`MemoryStore`] stands in for browser session/local storage when the
//! logic layer runs outside a browser (tests, native shells). [`MemoryRemote`]
//! is an in-memory rendition of the hosted document store with a switch to
//! simulate an outage, used by the degraded-mode tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use tindahan_core::UserId;

use super::{KeyValueStore, RemoteDocuments, StorageError};

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// In-memory document store keyed by `(collection, document id)`.
///
/// Documents carrying a `userId` field are returned by
/// [`RemoteDocuments::list_by_user`], matching the foreign-key convention of
/// the hosted store. Call [`MemoryRemote::set_unavailable`] to make every
/// operation fail with [`StorageError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryRemote {
    documents: RwLock<HashMap<(String, String), Value>>,
    unavailable: AtomicBool,
}

impl MemoryRemote {
    /// Create an empty remote store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteDocuments for MemoryRemote {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError> {
        self.check_available()?;
        Ok(self
            .documents
            .read()
            .await
            .get(&(collection.to_owned(), id.to_owned()))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StorageError> {
        self.check_available()?;
        self.documents
            .write()
            .await
            .insert((collection.to_owned(), id.to_owned()), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.documents
            .write()
            .await
            .remove(&(collection.to_owned(), id.to_owned()));
        Ok(())
    }

    async fn list_by_user(
        &self,
        collection: &str,
        user_id: &UserId,
    ) -> Result<Vec<Value>, StorageError> {
        self.check_available()?;
        let documents = self.documents.read().await;
        let mut matching: Vec<(String, Value)> = documents
            .iter()
            .filter(|((coll, _), doc)| {
                coll == collection
                    && doc.get("userId").and_then(Value::as_str) == Some(user_id.as_str())
            })
            .map(|((_, id), doc)| (id.clone(), doc.clone()))
            .collect();
        // HashMap iteration order is arbitrary; stable output keeps tests
        // and cart display deterministic.
        matching.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(matching.into_iter().map(|(_, doc)| doc).collect())
    }
}
