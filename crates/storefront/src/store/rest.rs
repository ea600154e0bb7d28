//! REST client for the hosted document store.
//!
//! Documents live at `{base}/v1/{project}/{collection}/{id}`; a collection
//! can be filtered by foreign key with `?userId=`. Product reads are cached
//! with `moka` (5-minute TTL) because the catalog changes rarely and every
//! page hits it; user-scoped collections are never cached here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;

use tindahan_core::UserId;

use crate::config::BackendConfig;

use super::remote::collections;
use super::{RemoteDocuments, StorageError};

/// How many response-body characters to keep in backend error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the hosted document store.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and one
/// product cache.
#[derive(Clone)]
pub struct RestRemoteStore {
    inner: Arc<RestRemoteStoreInner>,
}

struct RestRemoteStoreInner {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: String,
    product_cache: Cache<String, Value>,
}

impl RestRemoteStore {
    /// Create a new client from backend configuration.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Self {
            inner: Arc::new(RestRemoteStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                project_id: config.project_id.clone(),
                api_key: config.api_key.expose_secret().to_owned(),
                product_cache,
            }),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/v1/{}/{collection}/{id}",
            self.inner.base_url, self.inner.project_id
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/{}/{collection}",
            self.inner.base_url, self.inner.project_id
        )
    }

    /// Map a non-success response to a `StorageError`, reading the body for
    /// diagnostics.
    async fn backend_error(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(ERROR_BODY_LIMIT)
            .collect();
        StorageError::Backend { status, message }
    }

    async fn fetch_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError> {
        let response = self
            .inner
            .client
            .get(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl RemoteDocuments for RestRemoteStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError> {
        if collection == collections::PRODUCTS {
            let cache_key = format!("{collection}/{id}");
            if let Some(cached) = self.inner.product_cache.get(&cache_key).await {
                debug!(%id, "product cache hit");
                return Ok(Some(cached));
            }
            let fetched = self.fetch_document(collection, id).await?;
            if let Some(ref document) = fetched {
                self.inner
                    .product_cache
                    .insert(cache_key, document.clone())
                    .await;
            }
            return Ok(fetched);
        }

        self.fetch_document(collection, id).await
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StorageError> {
        let response = self
            .inner
            .client
            .put(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        if collection == collections::PRODUCTS {
            self.inner
                .product_cache
                .invalidate(&format!("{collection}/{id}"))
                .await;
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        let response = self
            .inner
            .client
            .delete(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        // Deleting an absent document is not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        if collection == collections::PRODUCTS {
            self.inner
                .product_cache
                .invalidate(&format!("{collection}/{id}"))
                .await;
        }

        Ok(())
    }

    async fn list_by_user(
        &self,
        collection: &str,
        user_id: &UserId,
    ) -> Result<Vec<Value>, StorageError> {
        let response = self
            .inner
            .client
            .get(self.collection_url(collection))
            .query(&[("userId", user_id.as_str())])
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        Ok(response.json().await?)
    }
}
