//! Session context shared across storefront operations.
//!
//! Page scripts used to keep the current user and store handles in
//! module-level globals; here all of it travels through an explicit
//! `SessionContext` owned by whatever drives a view. There are no
//! process-wide singletons.

use std::sync::Arc;

use crate::error::{Result, StorefrontError};
use crate::models::UserProfile;
use crate::store::{KeyValueStore, RemoteDocuments};

/// Everything a storefront operation needs: the three store handles and the
/// current identity.
///
/// Store handles are `Arc`s, so cloning a context is cheap; the identity is
/// per-clone state, owned by the view controller that holds the context.
#[derive(Clone)]
pub struct SessionContext {
    session: Arc<dyn KeyValueStore>,
    local: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteDocuments>,
    user: UserProfile,
}

impl SessionContext {
    /// Create a context for a fresh guest session.
    ///
    /// `session` is the tab-scoped transient store, `local` the longer-lived
    /// one; the distinction matters for the checkout handoff and order cache
    /// precedence.
    #[must_use]
    pub fn new(
        session: Arc<dyn KeyValueStore>,
        local: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteDocuments>,
    ) -> Self {
        Self {
            session,
            local,
            remote,
            user: UserProfile::guest(),
        }
    }

    /// Replace the guest identity with an authenticated one.
    ///
    /// The caller is expected to run [`crate::cart::reconcile`] next so the
    /// guest cart is appended onto the account cart.
    pub fn sign_in(&mut self, profile: UserProfile) {
        self.user = profile;
    }

    /// Drop back to a fresh guest identity.
    pub fn sign_out(&mut self) {
        self.user = UserProfile::guest();
    }

    /// The current identity, guest or authenticated.
    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    /// The current identity, or `NotSignedIn` for guests.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotSignedIn`] when the session is
    /// anonymous.
    pub fn require_user(&self) -> Result<&UserProfile> {
        if self.user.is_guest() {
            return Err(StorefrontError::NotSignedIn);
        }
        Ok(&self.user)
    }

    /// Tab-scoped transient store.
    #[must_use]
    pub fn session_store(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    /// Longer-lived local store.
    #[must_use]
    pub fn local_store(&self) -> &dyn KeyValueStore {
        self.local.as_ref()
    }

    /// The hosted document store.
    #[must_use]
    pub fn remote(&self) -> &dyn RemoteDocuments {
        self.remote.as_ref()
    }

    /// Shared handle to the local store, for components that hold their own
    /// reference.
    #[must_use]
    pub fn local_handle(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.local)
    }

    /// Shared handle to the remote store.
    #[must_use]
    pub fn remote_handle(&self) -> Arc<dyn RemoteDocuments> {
        Arc::clone(&self.remote)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryRemote, MemoryStore};
    use tindahan_core::{Email, UserId};

    fn context() -> SessionContext {
        SessionContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryRemote::new()),
        )
    }

    #[test]
    fn test_fresh_context_is_guest() {
        let ctx = context();
        assert!(ctx.user().is_guest());
        assert!(matches!(
            ctx.require_user(),
            Err(StorefrontError::NotSignedIn)
        ));
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut ctx = context();
        ctx.sign_in(UserProfile::new(
            UserId::new("u-1"),
            Email::parse("maria@example.ph").unwrap(),
        ));
        assert_eq!(ctx.require_user().unwrap().id.as_str(), "u-1");

        ctx.sign_out();
        assert!(ctx.user().is_guest());
    }
}
