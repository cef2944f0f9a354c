#![doc = "Storage and session abstractions shared by the `oauth-pending` crates."]
pub mod session;
pub mod store;
pub mod utils;
