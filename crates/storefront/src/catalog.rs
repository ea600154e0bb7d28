//! Product catalog reads.
//!
//! The catalog is written by the admin panel and read by everyone; prices
//! in old product documents are display strings, so validation happens
//! here, once, and "buy now" starts from an already-vetted product.

use serde_json::Value;
use tracing::instrument;

use tindahan_core::{Price, ProductId};

use crate::context::SessionContext;
use crate::error::{Result, StorefrontError};
use crate::models::{LineItemDraft, ModelError};
use crate::store::collections;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub sizes: Vec<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl Product {
    /// Parse a product from a raw catalog document.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if `name` is missing or the price does not
    /// normalize to a positive amount.
    pub fn from_document(id: ProductId, doc: &Value) -> Result<Self> {
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ModelError::MissingField { field: "name" })?;

        let price = match doc.get("price") {
            Some(Value::String(s)) => Price::parse(s).map_err(ModelError::from)?,
            Some(Value::Number(n)) => Price::parse(&n.to_string()).map_err(ModelError::from)?,
            _ => return Err(ModelError::MissingField { field: "price" }.into()),
        };

        let sizes = doc
            .get("sizes")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            name: name.to_owned(),
            brand: doc
                .get("brand")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            price,
            sizes,
            image: doc.get("image").and_then(Value::as_str).map(str::to_owned),
            description: doc
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    /// Build a buy-now draft for this product in the chosen size.
    ///
    /// The draft carries the display price; [`crate::checkout::begin_checkout`]
    /// re-normalizes it, so the checkout boundary stays the single point of
    /// price validation.
    #[must_use]
    pub fn draft(&self, size: &str, quantity: u32) -> LineItemDraft {
        LineItemDraft {
            product_id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            unit_price: self.price.to_string(),
            quantity: Some(quantity),
            size: size.to_owned(),
            image: self.image.clone(),
        }
    }
}

/// Fetch a product by id, `None` if it does not exist.
///
/// # Errors
///
/// Returns [`StorefrontError::RemoteUnavailable`] when the store is
/// unreachable and [`StorefrontError::Malformed`] for a document that fails
/// validation.
#[instrument(skip(ctx), fields(product = %product_id))]
pub async fn fetch_product(
    ctx: &SessionContext,
    product_id: &ProductId,
) -> Result<Option<Product>> {
    let Some(doc) = ctx
        .remote()
        .get(collections::PRODUCTS, product_id.as_str())
        .await
        .map_err(StorefrontError::RemoteUnavailable)?
    else {
        return Ok(None);
    };

    Ok(Some(Product::from_document(product_id.clone(), &doc)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryRemote, MemoryStore, RemoteDocuments};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;

    fn product_doc() -> Value {
        json!({
            "name": "Plain Tee",
            "brand": "Uniqlo",
            "price": "₱170.00",
            "sizes": ["S", "M", "L"],
            "image": "https://cdn.example.com/p-1.jpg"
        })
    }

    #[test]
    fn test_from_document() {
        let product = Product::from_document(ProductId::new("p-1"), &product_doc()).unwrap();
        assert_eq!(product.price.amount(), Decimal::new(17000, 2));
        assert_eq!(product.sizes, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_from_document_rejects_free() {
        let mut doc = product_doc();
        doc["price"] = json!("free");
        assert!(matches!(
            Product::from_document(ProductId::new("p-1"), &doc),
            Err(StorefrontError::Malformed(_))
        ));
    }

    #[test]
    fn test_draft_round_trips_price() {
        let product = Product::from_document(ProductId::new("p-1"), &product_doc()).unwrap();
        let item = product.draft("M", 2).resolve().unwrap();
        assert_eq!(item.unit_price, product.price);
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let remote = Arc::new(MemoryRemote::new());
        remote
            .put(collections::PRODUCTS, "p-1", product_doc())
            .await
            .unwrap();
        let ctx = SessionContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            remote,
        );

        let product = fetch_product(&ctx, &ProductId::new("p-1")).await.unwrap();
        assert_eq!(product.unwrap().name, "Plain Tee");

        let missing = fetch_product(&ctx, &ProductId::new("p-404")).await.unwrap();
        assert!(missing.is_none());
    }
}
