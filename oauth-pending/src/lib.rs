#![doc = "Session-backed correlation of in-flight OAuth2 authorization requests with their callbacks."]
pub mod config;
mod error;
mod repository;
pub mod store;
mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use oauth_pending_common::session::{Session, SessionAccess};
pub use oauth_pending_common::utils::generate_nonce as generate_state;
pub use repository::AuthorizationRequestRepository;
pub use store::{PendingAuthorizationStore, PendingSet};
pub use types::{AuthorizationRequest, AuthorizationRequestBuilder, CallbackParams, ResponseType};
