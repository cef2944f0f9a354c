use serde::Deserialize;

/// Query (or form) parameters of an authorization callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub iss: Option<String>,
    // https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// The correlation token echoed back by the authorization server, or `""` if it is missing.
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let params: CallbackParams =
            serde_json::from_str(r#"{"code":"abc","state":"s1","iss":"https://as.example.com"}"#)
                .expect("failed to deserialize");
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state(), "s1");
        assert_eq!(params.iss.as_deref(), Some("https://as.example.com"));
        assert_eq!(params.error, None);
    }

    #[test]
    fn test_missing_state() {
        let params: CallbackParams =
            serde_json::from_str(r#"{"error":"access_denied"}"#).expect("failed to deserialize");
        assert_eq!(params.state(), "");
        assert_eq!(params.error.as_deref(), Some("access_denied"));
    }
}
