//! Local cart snapshot.
//!
//! Pure data access over the `cart_snapshot` key: a JSON array of line
//! items in insertion order. Entries that fail validation are dropped with
//! a warning rather than poisoning the whole cart.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::models::{LineItem, LineKey};
use crate::store::{KeyValueStore, keys, write_typed};

/// Reads and writes the on-device cart snapshot.
#[derive(Clone)]
pub struct LocalCartStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCartStore {
    /// Create a store over the given local storage handle.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the current snapshot. Missing key means an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying store fails; malformed
    /// entries are skipped, not fatal.
    pub async fn snapshot(&self) -> Result<Vec<LineItem>> {
        let Some(raw) = self.store.get(keys::CART_SNAPSHOT).await? else {
            return Ok(Vec::new());
        };

        let Value::Array(entries) = raw else {
            warn!("cart snapshot is not an array, treating as empty");
            return Ok(Vec::new());
        };

        let mut items = Vec::with_capacity(entries.len());
        for entry in &entries {
            match LineItem::from_document(entry) {
                Ok(item) => items.push(item),
                Err(e) => warn!(error = %e, "dropping malformed cart entry"),
            }
        }
        Ok(items)
    }

    /// Replace the snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub async fn replace(&self, items: &[LineItem]) -> Result<()> {
        write_typed(self.store.as_ref(), keys::CART_SNAPSHOT, &items).await?;
        Ok(())
    }

    /// Add a line item, summing quantity into an existing line with the
    /// same `(product, size)` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub async fn add(&self, item: LineItem) -> Result<()> {
        let mut items = self.snapshot().await?;
        match items.iter_mut().find(|existing| existing.key() == item.key()) {
            Some(existing) => existing.quantity += item.quantity,
            None => items.push(item),
        }
        self.replace(&items).await
    }

    /// Remove the line with the given key, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub async fn remove(&self, key: &LineKey) -> Result<()> {
        let mut items = self.snapshot().await?;
        items.retain(|item| item.key() != *key);
        self.replace(&items).await
    }

    /// Clear the snapshot entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(keys::CART_SNAPSHOT).await?;
        Ok(())
    }
}
