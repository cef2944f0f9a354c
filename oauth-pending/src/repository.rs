use crate::error::Result;
use crate::types::AuthorizationRequest;
use oauth_pending_common::session::SessionAccess;
use std::future::Future;

/// Persists authorization requests between the redirect to the authorization server and
/// the callback that completes it.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait AuthorizationRequestRepository<A>
where
    A: SessionAccess,
{
    /// Returns the pending request matching `state` without consuming it.
    fn load_authorization_request(
        &self,
        access: &A,
        state: &str,
    ) -> impl Future<Output = Result<Option<AuthorizationRequest>>>;
    /// Stores `request` until its callback arrives.
    fn save_authorization_request(
        &self,
        request: AuthorizationRequest,
        access: &A,
    ) -> impl Future<Output = Result<()>>;
    /// Consumes and returns the pending request matching `state`.
    fn remove_authorization_request(
        &self,
        access: &A,
        state: &str,
    ) -> impl Future<Output = Result<Option<AuthorizationRequest>>>;
}
