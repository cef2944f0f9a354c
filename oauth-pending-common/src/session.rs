//! Sessions as seen by components that keep per-user state between requests.
//!
//! A session is an attribute store ([`Store<String, Value>`](crate::store::Store)) scoped to
//! one user's browsing context. A [`SessionAccess`] is bound to a single inbound request and
//! hands out that request's session, creating one only when asked to.
pub mod memory;

use crate::store::Store;
use serde_json::Value;
use std::error::Error;
use std::future::Future;

/// Attribute storage for a single user session.
pub trait Session: Store<String, Value> {}

impl<T> Session for T where T: Store<String, Value> {}

#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait SessionAccess {
    type Session: Session + Send + Sync;
    type Error: Error + Send + Sync + 'static;

    /// Returns the session associated with the current request.
    ///
    /// When no session exists yet, a new one is created if `create` is `true`;
    /// otherwise `None` is returned and nothing is created.
    fn session(
        &self,
        create: bool,
    ) -> impl Future<Output = Result<Option<Self::Session>, Self::Error>>;
}
