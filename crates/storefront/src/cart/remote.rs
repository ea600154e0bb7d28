//! Remote cart mirror.
//!
//! Each cart line is its own document in the `cart` collection, keyed
//! deterministically by `(user, product, size)` so the same line always
//! lands on the same document. The store offers no transactions; an
//! increment is a read-then-write and can lose a concurrent update
//! (accepted at this scale, last write wins).

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use tindahan_core::UserId;

use crate::models::{LineItem, LineKey};
use crate::store::{RemoteDocuments, StorageError, collections};

/// Reads and writes the per-user cart documents in the remote store.
#[derive(Clone)]
pub struct RemoteCartMirror {
    remote: Arc<dyn RemoteDocuments>,
}

impl RemoteCartMirror {
    /// Create a mirror over the given remote handle.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteDocuments>) -> Self {
        Self { remote }
    }

    /// Deterministic document id for one cart line.
    fn document_id(user_id: &UserId, key: &LineKey) -> String {
        format!("{user_id}:{}:{}", key.product_id, key.size)
    }

    /// Serialize a line item to its cart document shape, tagged with the
    /// owning user.
    fn to_cart_document(user_id: &UserId, item: &LineItem) -> Result<Value, StorageError> {
        let mut doc = serde_json::to_value(item)?;
        if let Some(map) = doc.as_object_mut() {
            map.insert("userId".to_owned(), Value::String(user_id.as_str().to_owned()));
        }
        Ok(doc)
    }

    /// Read the user's remote cart. Malformed documents are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote read fails.
    pub async fn snapshot(&self, user_id: &UserId) -> Result<Vec<LineItem>, StorageError> {
        let documents = self
            .remote
            .list_by_user(collections::CART, user_id)
            .await?;

        let mut items = Vec::with_capacity(documents.len());
        for doc in &documents {
            match LineItem::from_document(doc) {
                Ok(item) => items.push(item),
                Err(e) => warn!(error = %e, "dropping malformed remote cart document"),
            }
        }
        Ok(items)
    }

    /// Insert a line or sum its quantity into an existing line with the
    /// same key. Quantity is always incremented, never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote read or write fails.
    pub async fn upsert_increment(
        &self,
        user_id: &UserId,
        item: &LineItem,
    ) -> Result<(), StorageError> {
        let id = Self::document_id(user_id, &item.key());

        let mut merged = item.clone();
        if let Some(existing_doc) = self.remote.get(collections::CART, &id).await? {
            match LineItem::from_document(&existing_doc) {
                Ok(existing) => merged.quantity += existing.quantity,
                // A corrupt document is replaced outright rather than
                // summed into.
                Err(e) => warn!(error = %e, "replacing malformed remote cart document"),
            }
        }

        let doc = Self::to_cart_document(user_id, &merged)?;
        self.remote.put(collections::CART, &id, doc).await
    }

    /// Replace a line's document wholesale (quantity edits from the cart
    /// page).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote write fails.
    pub async fn put_line(&self, user_id: &UserId, item: &LineItem) -> Result<(), StorageError> {
        let id = Self::document_id(user_id, &item.key());
        let doc = Self::to_cart_document(user_id, item)?;
        self.remote.put(collections::CART, &id, doc).await
    }

    /// Delete one line.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote delete fails.
    pub async fn remove_line(&self, user_id: &UserId, key: &LineKey) -> Result<(), StorageError> {
        self.remote
            .delete(collections::CART, &Self::document_id(user_id, key))
            .await
    }

    /// Delete every line in the user's cart (after a successful checkout of
    /// the whole cart).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if listing or any delete fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), StorageError> {
        let items = self.snapshot(user_id).await?;
        for item in &items {
            self.remove_line(user_id, &item.key()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryRemote;
    use tindahan_core::{Price, ProductId};

    fn item(product: &str, size: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            brand: String::new(),
            unit_price: Price::parse("170").unwrap(),
            quantity,
            size: size.to_owned(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_increments() {
        let mirror = RemoteCartMirror::new(Arc::new(MemoryRemote::new()));
        let user = UserId::new("u-1");

        mirror.upsert_increment(&user, &item("p-1", "M", 2)).await.unwrap();
        mirror.upsert_increment(&user, &item("p-1", "M", 3)).await.unwrap();

        let items = mirror.snapshot(&user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_snapshot_scoped_to_user() {
        let mirror = RemoteCartMirror::new(Arc::new(MemoryRemote::new()));
        mirror
            .upsert_increment(&UserId::new("u-1"), &item("p-1", "M", 1))
            .await
            .unwrap();
        mirror
            .upsert_increment(&UserId::new("u-2"), &item("p-2", "M", 1))
            .await
            .unwrap();

        let items = mirror.snapshot(&UserId::new("u-1")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id.as_str(), "p-1");
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mirror = RemoteCartMirror::new(Arc::new(MemoryRemote::new()));
        let user = UserId::new("u-1");
        mirror.upsert_increment(&user, &item("p-1", "M", 1)).await.unwrap();
        mirror.upsert_increment(&user, &item("p-2", "L", 1)).await.unwrap();

        mirror.remove_line(&user, &item("p-1", "M", 1).key()).await.unwrap();
        assert_eq!(mirror.snapshot(&user).await.unwrap().len(), 1);

        mirror.clear(&user).await.unwrap();
        assert!(mirror.snapshot(&user).await.unwrap().is_empty());
    }
}
