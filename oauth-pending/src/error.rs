use thiserror::Error;

/// Error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller broke the contract of an operation; nothing was written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The session attribute holds something other than a pending request or a map of them.
    #[error("corrupt pending-request state: {0}")]
    CorruptState(String),
    #[error("session store error: {0}")]
    SessionStore(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("loading config error: {0}")]
    ConfigLoad(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("saving config error: {0}")]
    ConfigSave(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Type alias to use this crate's [`Error`](enum@crate::Error) type in a [`Result`](core::result::Result).
pub type Result<T> = core::result::Result<T, Error>;
