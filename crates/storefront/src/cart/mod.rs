//! Shopping cart: local snapshot, remote mirror, and reconciliation.
//!
//! Two snapshots of the same conceptual cart can exist at once: the
//! on-device one a guest builds up, and the per-user documents in the
//! remote `cart` collection. When the session becomes authenticated,
//! [`reconcile`] appends the guest snapshot onto the account cart with
//! increment semantics and clears the local copy only after every remote
//! write has succeeded.

pub mod local;
pub mod reconcile;
pub mod remote;

pub use local::LocalCartStore;
pub use reconcile::{MergeOutcome, MergePlan, RemoteMutation, merge, reconcile};
pub use remote::RemoteCartMirror;
