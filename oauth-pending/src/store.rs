//! Session-backed storage of pending authorization requests.
mod pending_set;

pub use self::pending_set::PendingSet;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::repository::AuthorizationRequestRepository;
use crate::types::AuthorizationRequest;
use oauth_pending_common::session::SessionAccess;
use oauth_pending_common::store::Store;
use tracing::{debug, trace, warn};

/// The session attribute used when none is configured.
pub const DEFAULT_ATTRIBUTE_NAME: &str =
    concat!(module_path!(), "::PendingAuthorizationStore.AUTHORIZATION_REQUEST");

pub(crate) fn default_attribute_name() -> String {
    String::from(DEFAULT_ATTRIBUTE_NAME)
}

/// Keeps the authorization requests of a session between the redirect to the authorization
/// server and its callback, matched by their `state`.
///
/// The store holds nothing but its configuration: every operation reads the session
/// attribute, and writes it back when something changed. One instance can therefore be
/// shared by all request handlers.
///
/// Concurrent `save`s in the same session (e.g. from two tabs) are plain read-modify-write
/// cycles; with [`Config::allow_multiple`] one of them can be lost unless the session store
/// serializes its own updates.
#[derive(Clone, Debug, Default)]
pub struct PendingAuthorizationStore {
    config: Config,
}

impl PendingAuthorizationStore {
    /// Creates a store from `config`, rejecting a configuration that fails
    /// [`Config::validate`].
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
    /// A store that keeps every pending request of a session, not only the latest one.
    pub fn allow_multiple() -> Self {
        Self { config: Config { allow_multiple: true, ..Default::default() } }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Returns the pending request for `state` without consuming it.
    ///
    /// Never creates a session.
    pub async fn load<A>(&self, access: &A, state: &str) -> Result<Option<AuthorizationRequest>>
    where
        A: SessionAccess,
    {
        if state.is_empty() {
            return Ok(None);
        }
        let Some(session) = access.session(false).await.map_err(session_error)? else {
            trace!(attribute = %self.config.attribute_name, "no session to load from");
            return Ok(None);
        };
        let pending = self.read(&session).await?;
        let request = pending.get(state).cloned();
        trace!(
            attribute = %self.config.attribute_name,
            pending = pending.len(),
            found = request.is_some(),
            "loaded pending authorization request"
        );
        Ok(request)
    }
    /// Stores `request` until its callback arrives, creating a session if needed.
    ///
    /// Unless multiple requests are allowed, this replaces whatever was pending before.
    pub async fn save<A>(&self, request: AuthorizationRequest, access: &A) -> Result<()>
    where
        A: SessionAccess,
    {
        if request.state.is_empty() {
            return Err(Error::InvalidArgument(String::from(
                "authorization request state cannot be empty",
            )));
        }
        let session = access
            .session(true)
            .await
            .map_err(session_error)?
            .ok_or_else(|| Error::SessionStore("no session was created for the request".into()))?;
        let pending = if self.config.allow_multiple {
            let mut pending = self.read(&session).await?;
            pending.insert(request);
            pending
        } else {
            PendingSet::One(request)
        };
        self.write(&session, &pending).await?;
        debug!(
            attribute = %self.config.attribute_name,
            allow_multiple = self.config.allow_multiple,
            pending = pending.len(),
            "saved pending authorization request"
        );
        Ok(())
    }
    /// Consumes the pending request for `state` and returns it.
    ///
    /// Nothing is written when no request matches; what remains is stored in its
    /// minimal encoding.
    pub async fn remove<A>(&self, access: &A, state: &str) -> Result<Option<AuthorizationRequest>>
    where
        A: SessionAccess,
    {
        if state.is_empty() {
            return Ok(None);
        }
        let Some(session) = access.session(false).await.map_err(session_error)? else {
            return Ok(None);
        };
        let mut pending = self.read(&session).await?;
        let Some(removed) = pending.remove(state) else {
            trace!(
                attribute = %self.config.attribute_name,
                "no pending authorization request to remove"
            );
            return Ok(None);
        };
        self.write(&session, &pending).await?;
        debug!(
            attribute = %self.config.attribute_name,
            pending = pending.len(),
            "removed pending authorization request"
        );
        Ok(Some(removed))
    }
    /// Looks up and consumes the pending request for `state` in a single call.
    pub async fn load_and_remove<A>(
        &self,
        access: &A,
        state: &str,
    ) -> Result<Option<AuthorizationRequest>>
    where
        A: SessionAccess,
    {
        self.remove(access, state).await
    }
    async fn read<S>(&self, session: &S) -> Result<PendingSet>
    where
        S: Store<String, serde_json::Value>,
    {
        let value = session.get(&self.config.attribute_name).await.map_err(session_error)?;
        PendingSet::decode(value).map_err(|err| {
            warn!(
                attribute = %self.config.attribute_name,
                %err,
                "unreadable pending authorization requests"
            );
            err
        })
    }
    async fn write<S>(&self, session: &S, pending: &PendingSet) -> Result<()>
    where
        S: Store<String, serde_json::Value>,
    {
        let result = match pending.encode()? {
            Some(value) => session.set(self.config.attribute_name.clone(), value).await,
            None => session.del(&self.config.attribute_name).await,
        };
        result.map_err(session_error)
    }
}

impl<A> AuthorizationRequestRepository<A> for PendingAuthorizationStore
where
    A: SessionAccess + Sync,
{
    async fn load_authorization_request(
        &self,
        access: &A,
        state: &str,
    ) -> Result<Option<AuthorizationRequest>> {
        self.load(access, state).await
    }
    async fn save_authorization_request(
        &self,
        request: AuthorizationRequest,
        access: &A,
    ) -> Result<()> {
        self.save(request, access).await
    }
    async fn remove_authorization_request(
        &self,
        access: &A,
        state: &str,
    ) -> Result<Option<AuthorizationRequest>> {
        self.remove(access, state).await
    }
}

fn session_error<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::SessionStore(Box::new(err))
}
