//! Ordered fallback resolution.
//!
//! Pages used to each hand-roll their own storage fallback chain, in
//! varying orders. Here there is exactly one: callers declare an
//! ordered list of sources and the first one that answers wins. A source
//! that errors is logged and skipped - an unreachable provider must not
//! mask a later one that still has the data.

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

/// One provider in a fallback chain.
#[async_trait]
pub trait FallbackSource {
    /// What this chain resolves.
    type Item;

    /// Short name for logs and [`Resolved::source`].
    fn label(&self) -> &'static str;

    /// Try to produce the value. `Ok(None)` means "not here, ask the next
    /// source"; an error means the provider itself failed.
    async fn fetch(&self) -> Result<Option<Self::Item>>;
}

/// A resolved value plus which source answered.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    /// Label of the winning source.
    pub source: &'static str,
}

/// Walk `sources` in order and return the first hit.
///
/// Precedence is exactly the slice order. Returns `Ok(None)` when every
/// source missed or failed.
///
/// # Errors
///
/// Never fails today; source errors are demoted to warnings so the chain
/// can keep going. The `Result` stays in the signature so a chain can later
/// choose to escalate.
pub async fn resolve_with_fallback<S>(sources: &[S]) -> Result<Option<Resolved<S::Item>>>
where
    S: FallbackSource + Sync,
{
    for source in sources {
        match source.fetch().await {
            Ok(Some(value)) => {
                return Ok(Some(Resolved {
                    value,
                    source: source.label(),
                }));
            }
            Ok(None) => {}
            Err(e) => warn!(source = source.label(), error = %e, "fallback source failed"),
        }
    }
    Ok(None)
}
