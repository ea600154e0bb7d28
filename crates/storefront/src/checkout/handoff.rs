//! Checkout handoff between the product page and the checkout view.
//!
//! A "buy now" serializes one line item plus the buyer's identity into the
//! session store, with a copy in the longer-lived local store as fallback.
//! The checkout view consumes whichever copy it finds first; a successful
//! submission clears both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::context::SessionContext;
use crate::error::Result;
use crate::models::{LineItem, LineItemDraft, UserProfile};
use crate::store::{keys, read_typed, write_typed};

use super::random_suffix;

/// Opaque token identifying one staged checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandoffToken(String);

impl HandoffToken {
    fn generate() -> Self {
        Self(format!("ho-{}-{}", Utc::now().timestamp_millis(), random_suffix(6)))
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The serialized handoff: one validated line item, the buyer, and when it
/// was staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    pub token: HandoffToken,
    pub line_item: LineItem,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

/// Stage a line item for checkout.
///
/// The draft's display price is normalized here; a price that does not
/// resolve to a positive amount rejects the handoff so a zero-cost order
/// can never be created silently.
///
/// # Errors
///
/// Returns [`crate::StorefrontError::InvalidPrice`] if the price fails
/// normalization, [`crate::StorefrontError::NotSignedIn`] for guests, and
/// a storage error if neither transient store accepts the write.
#[instrument(skip(ctx, draft), fields(product = %draft.product_id))]
pub async fn begin_checkout(ctx: &SessionContext, draft: LineItemDraft) -> Result<HandoffToken> {
    let user = ctx.require_user()?.clone();
    let line_item = draft.resolve()?;

    let handoff = CheckoutHandoff {
        token: HandoffToken::generate(),
        line_item,
        user,
        created_at: Utc::now(),
    };

    write_typed(ctx.session_store(), keys::CHECKOUT_HANDOFF, &handoff).await?;
    write_typed(ctx.local_store(), keys::LAST_CHECKOUT, &handoff).await?;

    Ok(handoff.token)
}

/// Read the staged handoff: session store first, local fallback second.
///
/// Does not clear anything; the handoff stays until submission succeeds or
/// [`clear_checkout`] runs.
///
/// # Errors
///
/// Returns a storage error only if the fallback store also fails; a failed
/// session read degrades to the fallback with a warning.
pub async fn consume_checkout(ctx: &SessionContext) -> Result<Option<CheckoutHandoff>> {
    match read_typed(ctx.session_store(), keys::CHECKOUT_HANDOFF).await {
        Ok(Some(handoff)) => return Ok(Some(handoff)),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "session handoff unreadable, trying fallback"),
    }

    Ok(read_typed(ctx.local_store(), keys::LAST_CHECKOUT).await?)
}

/// Remove the handoff from both transient stores.
///
/// # Errors
///
/// Returns a storage error if either removal fails.
pub async fn clear_checkout(ctx: &SessionContext) -> Result<()> {
    ctx.session_store().remove(keys::CHECKOUT_HANDOFF).await?;
    ctx.local_store().remove(keys::LAST_CHECKOUT).await?;
    Ok(())
}
