//! User identity as seen by the storefront.
//!
//! Authentication itself is the hosted provider's problem; the storefront
//! only carries the minimal identity it needs to key carts, favorites, and
//! orders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tindahan_core::{Email, UserId};

/// Prefix for locally-generated guest identities.
const GUEST_PREFIX: &str = "guest-";

/// Minimal user identity: id plus email when authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Create an authenticated profile from the auth provider's identity.
    #[must_use]
    pub const fn new(id: UserId, email: Email) -> Self {
        Self {
            id,
            email: Some(email),
            display_name: None,
        }
    }

    /// Create a fresh anonymous guest identity.
    ///
    /// Guest identities exist only on-device; they key the local cart that
    /// later becomes the `local` side of reconciliation at sign-in.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            id: UserId::new(format!("{GUEST_PREFIX}{}", Uuid::new_v4())),
            email: None,
            display_name: None,
        }
    }

    /// Whether this is an on-device guest identity.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.id.as_str().starts_with(GUEST_PREFIX)
    }
}
