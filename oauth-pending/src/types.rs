mod parameters;
mod request;

pub use parameters::CallbackParams;
pub use request::{AuthorizationRequest, AuthorizationRequestBuilder, ResponseType};
