//! Cart reconciliation.
//!
//! When a guest signs in, the cart they built on-device has to be folded
//! into whatever their account cart already holds remotely. The merge
//! models "appending a guest session onto an existing account cart":
//! matching lines (same product and size) get their quantities summed,
//! never overwritten, and unmatched local lines are inserted.
//!
//! Re-running the merge with the same local snapshot would double-count,
//! so the driver clears the local snapshot - but only after every remote
//! write has succeeded. A failed write leaves the local cart in place for
//! the next attempt; the increments already applied are not rolled back
//! (the store has no transactions, see [`crate::store::remote`]).

use tracing::{instrument, warn};

use crate::context::SessionContext;
use crate::error::{Result, StorefrontError};
use crate::models::{LineItem, LineKey};

use super::local::LocalCartStore;
use super::remote::RemoteCartMirror;

/// A single write needed to converge the remote cart to the merged one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteMutation {
    /// No remote line matched this local line; insert it.
    Insert(LineItem),
    /// A remote line matched; add the local quantity onto it.
    Increment {
        /// Which remote line to bump.
        key: LineKey,
        /// Local quantity to add.
        by: u32,
    },
}

/// Result of the pure merge: the converged snapshot plus the remote writes
/// that produce it.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Remote lines with local quantities folded in, remote order first,
    /// new local lines appended.
    pub merged: Vec<LineItem>,
    /// Writes to apply, one per local line.
    pub mutations: Vec<RemoteMutation>,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The snapshot the cart page should display.
    pub merged: Vec<LineItem>,
    /// True when the remote cart could not be read and `merged` is the
    /// local snapshot shown read-only.
    pub degraded: bool,
}

/// Merge a local snapshot into a remote one.
///
/// Pure: no storage is touched. For every local line with a match in
/// `remote` (same product and size) the plan increments the remote
/// quantity by the local quantity; every unmatched local line becomes an
/// insert.
#[must_use]
pub fn merge(local: &[LineItem], remote: &[LineItem]) -> MergePlan {
    let mut merged: Vec<LineItem> = remote.to_vec();
    let mut mutations = Vec::with_capacity(local.len());

    for local_item in local {
        let key = local_item.key();
        match merged.iter_mut().find(|remote_item| remote_item.key() == key) {
            Some(remote_item) => {
                remote_item.quantity += local_item.quantity;
                mutations.push(RemoteMutation::Increment {
                    key,
                    by: local_item.quantity,
                });
            }
            None => {
                merged.push(local_item.clone());
                mutations.push(RemoteMutation::Insert(local_item.clone()));
            }
        }
    }

    MergePlan { merged, mutations }
}

/// Reconcile the local cart with the remote one for the signed-in user.
///
/// On success the local snapshot is cleared, so running this again is a
/// no-op rather than a double count. If the remote cart cannot be read the
/// local snapshot is returned as a degraded read-only view: nothing is
/// written, nothing is cleared, and the failure is logged instead of
/// surfaced (it becomes the user's problem only when they try to check
/// out).
///
/// # Errors
///
/// Returns [`StorefrontError::NotSignedIn`] for guest sessions, and
/// [`StorefrontError::RemoteUnavailable`] if applying the merge writes
/// fails partway.
#[instrument(skip(ctx), fields(user = %ctx.user().id))]
pub async fn reconcile(ctx: &SessionContext) -> Result<MergeOutcome> {
    let user = ctx.require_user()?;
    let local_cart = LocalCartStore::new(ctx.local_handle());
    let mirror = RemoteCartMirror::new(ctx.remote_handle());

    let local = local_cart.snapshot().await?;

    let remote = match mirror.snapshot(&user.id).await {
        Ok(remote) => remote,
        Err(e) => {
            warn!(error = %e, "remote cart unreadable, showing local cart read-only");
            return Ok(MergeOutcome {
                merged: local,
                degraded: true,
            });
        }
    };

    let plan = merge(&local, &remote);

    for mutation in &plan.mutations {
        let item = match mutation {
            RemoteMutation::Insert(item) => item.clone(),
            RemoteMutation::Increment { key, by } => {
                // The increment is applied as an upsert of a line carrying
                // only the local quantity; the mirror sums it into the
                // existing document.
                let Some(local_item) = local.iter().find(|i| i.key() == *key) else {
                    continue;
                };
                let mut increment_only = local_item.clone();
                increment_only.quantity = *by;
                increment_only
            }
        };
        mirror
            .upsert_increment(&user.id, &item)
            .await
            .map_err(StorefrontError::RemoteUnavailable)?;
    }

    // Clear only once every write has landed; a partial failure above keeps
    // the local snapshot for the retry.
    local_cart.clear().await?;

    Ok(MergeOutcome {
        merged: plan.merged,
        degraded: false,
    })
}
