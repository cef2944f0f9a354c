use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    #[default]
    Code,
    // https://datatracker.ietf.org/doc/html/rfc6749#section-4.2.1
    Token,
}

/// An authorization request that has been sent to an authorization server and is waiting
/// for its callback.
///
/// Only [`state`](Self::state) has meaning to the pending request store; every other field
/// is carried through untouched for whoever completes the flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    // https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1
    pub authorization_uri: String,
    pub response_type: ResponseType,
    pub client_id: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub scopes: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_request_uri: Option<String>,
}

impl AuthorizationRequest {
    pub fn builder(
        authorization_uri: impl Into<String>,
        client_id: impl Into<String>,
        state: impl Into<String>,
    ) -> AuthorizationRequestBuilder {
        AuthorizationRequestBuilder {
            inner: Self {
                authorization_uri: authorization_uri.into(),
                response_type: ResponseType::default(),
                client_id: client_id.into(),
                state: state.into(),
                issuer: None,
                redirect_uri: None,
                scopes: BTreeSet::new(),
                additional_parameters: Map::new(),
                attributes: Map::new(),
                authorization_request_uri: None,
            },
        }
    }
    /// The space-delimited `scope` parameter value, if any scopes were requested.
    pub fn scope(&self) -> Option<String> {
        if self.scopes.is_empty() {
            None
        } else {
            Some(self.scopes.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
        }
    }
}

/// A builder for [`AuthorizationRequest`].
#[derive(Debug, Clone)]
pub struct AuthorizationRequestBuilder {
    inner: AuthorizationRequest,
}

impl AuthorizationRequestBuilder {
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.inner.response_type = response_type;
        self
    }
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.inner.issuer = Some(issuer.into());
        self
    }
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.inner.redirect_uri = Some(redirect_uri.into());
        self
    }
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }
    pub fn additional_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.inner.additional_parameters.insert(name.into(), value.into());
        self
    }
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.attributes.insert(name.into(), value.into());
        self
    }
    pub fn authorization_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.inner.authorization_request_uri = Some(uri.into());
        self
    }
    pub fn build(self) -> AuthorizationRequest {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let request = AuthorizationRequest::builder(
            "https://as.example.com/authorize",
            "client-1",
            "xyz",
        )
        .issuer("https://as.example.com")
        .redirect_uri("https://app.example.com/callback")
        .scopes(["profile", "openid"])
        .additional_parameter("nonce", "n-0S6_WzA2Mj")
        .attribute("registration_id", "example")
        .build();
        assert_eq!(request.response_type, ResponseType::Code);
        assert_eq!(request.state, "xyz");
        assert_eq!(request.scope().as_deref(), Some("openid profile"));
        assert_eq!(request.additional_parameters.get("nonce"), Some(&json!("n-0S6_WzA2Mj")));
    }

    #[test]
    fn test_serialize_omits_empty_fields() {
        let request =
            AuthorizationRequest::builder("https://as.example.com/authorize", "client-1", "xyz")
                .build();
        assert_eq!(
            serde_json::to_value(&request).expect("failed to serialize"),
            json!({
                "authorization_uri": "https://as.example.com/authorize",
                "response_type": "code",
                "client_id": "client-1",
                "state": "xyz",
            })
        );
        assert_eq!(request.scope(), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let request: AuthorizationRequest = serde_json::from_value(json!({
            "authorization_uri": "https://as.example.com/authorize",
            "response_type": "token",
            "client_id": "client-1",
            "state": "xyz",
            "scopes": ["read"],
        }))
        .expect("failed to deserialize");
        assert_eq!(request.response_type, ResponseType::Token);
        assert_eq!(request.redirect_uri, None);
        assert!(request.scopes.contains("read"));
        assert!(request.attributes.is_empty());
    }
}
