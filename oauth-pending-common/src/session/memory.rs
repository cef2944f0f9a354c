use super::SessionAccess;
use crate::store::memory::{Error, MemoryStore};
use crate::store::Store;
use crate::utils::generate_nonce;
use serde_json::Value;
use tokio::sync::Mutex;

/// An in-process session: a named bag of JSON attributes.
#[derive(Clone, Debug)]
pub struct MemorySession {
    id: String,
    attributes: MemoryStore<String, Value>,
}

impl MemorySession {
    fn new(id: String) -> Self {
        Self { id, attributes: MemoryStore::default() }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Store<String, Value> for MemorySession {
    type Error = Error;

    async fn get(&self, key: &String) -> Result<Option<Value>, Self::Error> {
        self.attributes.get(key).await
    }
    async fn set(&self, key: String, value: Value) -> Result<(), Self::Error> {
        self.attributes.set(key, value).await
    }
    async fn del(&self, key: &String) -> Result<(), Self::Error> {
        self.attributes.del(key).await
    }
    async fn clear(&self) -> Result<(), Self::Error> {
        self.attributes.clear().await
    }
}

/// Holds every live [`MemorySession`] of a process, keyed by session id.
///
/// Clones share the same sessions, so one registry can be handed to every request handler.
///
/// Sessions are never expired here: they stay until [`invalidate`](Self::invalidate) is
/// called. The host is responsible for invalidating idle or logged-out sessions, otherwise
/// the registry grows without bound.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionRegistry {
    sessions: MemoryStore<String, MemorySession>,
}

impl MemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Binds a [`MemorySessionAccess`] to an inbound request carrying `session_id`
    /// (typically taken from a cookie), or `None` when the request has no session yet.
    pub fn access(&self, session_id: Option<String>) -> MemorySessionAccess {
        MemorySessionAccess { registry: self.clone(), session_id: Mutex::new(session_id) }
    }
    pub async fn get(&self, session_id: &str) -> Result<Option<MemorySession>, Error> {
        self.sessions.get(&session_id.to_string()).await
    }
    /// Drops the session and all of its attributes.
    pub async fn invalidate(&self, session_id: &str) -> Result<(), Error> {
        self.sessions.del(&session_id.to_string()).await
    }
    pub fn len(&self) -> Result<usize, Error> {
        self.sessions.len()
    }
    pub fn is_empty(&self) -> Result<bool, Error> {
        self.sessions.is_empty()
    }
    async fn create(&self) -> Result<MemorySession, Error> {
        let session = MemorySession::new(generate_nonce());
        self.sessions.set(session.id.clone(), session.clone()).await?;
        Ok(session)
    }
}

/// Per-request view of a [`MemorySessionRegistry`].
#[derive(Debug)]
pub struct MemorySessionAccess {
    registry: MemorySessionRegistry,
    session_id: Mutex<Option<String>>,
}

impl MemorySessionAccess {
    /// The id of the session bound to this request, including one created during the request.
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }
}

impl SessionAccess for MemorySessionAccess {
    type Session = MemorySession;
    type Error = Error;

    async fn session(&self, create: bool) -> Result<Option<Self::Session>, Self::Error> {
        let mut session_id = self.session_id.lock().await;
        if let Some(id) = session_id.as_deref() {
            if let Some(session) = self.registry.get(id).await? {
                return Ok(Some(session));
            }
        }
        if !create {
            return Ok(None);
        }
        let session = self.registry.create().await?;
        *session_id = Some(session.id.clone());
        Ok(Some(session))
    }
}
