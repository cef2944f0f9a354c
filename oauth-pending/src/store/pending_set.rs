use crate::error::{Error, Result};
use crate::types::AuthorizationRequest;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The pending authorization requests of one session, keyed by `state`.
///
/// The variant doubles as the stored encoding: a single request is stored bare, more than
/// one as a map, and nothing at all when the set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingSet {
    #[default]
    Empty,
    One(AuthorizationRequest),
    Many(BTreeMap<String, AuthorizationRequest>),
}

impl PendingSet {
    /// Decodes the value of the session attribute, `None` meaning the attribute is absent.
    pub fn decode(value: Option<Value>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(Self::Empty);
        };
        let Value::Object(object) = value else {
            return Err(Error::CorruptState(format!(
                "expected an authorization request or a map of them, found {}",
                kind_of(&value)
            )));
        };
        // a bare request carries its own string `state`; map values are always objects
        if object.get("state").is_some_and(Value::is_string) {
            let request = decode_request(object)?;
            if request.state.is_empty() {
                return Err(Error::CorruptState(String::from(
                    "stored authorization request has an empty state",
                )));
            }
            return Ok(Self::One(request));
        }
        let mut requests = BTreeMap::new();
        for (state, value) in object {
            let Value::Object(entry) = value else {
                return Err(Error::CorruptState(format!(
                    "expected a map entry to be an authorization request, found {}",
                    kind_of(&value)
                )));
            };
            let request = decode_request(entry)?;
            if state.is_empty() || state != request.state {
                return Err(Error::CorruptState(String::from(
                    "stored authorization request is not keyed by its own state",
                )));
            }
            requests.insert(state, request);
        }
        Ok(if requests.is_empty() { Self::Empty } else { Self::Many(requests) })
    }
    /// Encodes the set for storage; `None` means the attribute should be removed.
    pub fn encode(&self) -> Result<Option<Value>> {
        Ok(match self {
            Self::Empty => None,
            Self::One(request) => Some(serde_json::to_value(request)?),
            Self::Many(requests) => Some(serde_json::to_value(requests)?),
        })
    }
    pub fn get(&self, state: &str) -> Option<&AuthorizationRequest> {
        match self {
            Self::Empty => None,
            Self::One(request) => (request.state == state).then_some(request),
            Self::Many(requests) => requests.get(state),
        }
    }
    /// Adds `request`, replacing any entry with the same state.
    ///
    /// The result is always map-encoded, even when it holds a single request.
    pub fn insert(&mut self, request: AuthorizationRequest) {
        let mut requests = std::mem::take(self).into_map();
        requests.insert(request.state.clone(), request);
        *self = Self::Many(requests);
    }
    /// Removes the request for `state`, collapsing what remains to its minimal encoding.
    ///
    /// The set is left untouched when nothing matches.
    pub fn remove(&mut self, state: &str) -> Option<AuthorizationRequest> {
        if let Self::Many(requests) = self {
            let removed = requests.remove(state)?;
            *self = Self::from_map(std::mem::take(requests));
            return Some(removed);
        }
        self.get(state)?;
        match std::mem::take(self) {
            Self::One(request) => Some(request),
            _ => None,
        }
    }
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(requests) => requests.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn from_map(mut requests: BTreeMap<String, AuthorizationRequest>) -> Self {
        match requests.len() {
            0 => Self::Empty,
            1 => requests.pop_first().map_or(Self::Empty, |(_, request)| Self::One(request)),
            _ => Self::Many(requests),
        }
    }
    fn into_map(self) -> BTreeMap<String, AuthorizationRequest> {
        match self {
            Self::Empty => BTreeMap::new(),
            Self::One(request) => [(request.state.clone(), request)].into_iter().collect(),
            Self::Many(requests) => requests,
        }
    }
}

fn decode_request(object: Map<String, Value>) -> Result<AuthorizationRequest> {
    serde_json::from_value(Value::Object(object))
        .map_err(|err| Error::CorruptState(format!("invalid authorization request: {err}")))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
