//! HTTP client and the action creators that drive the store.

pub mod api;
pub mod session;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Wallet not connected")]
    WalletNotConnected,
}

impl ClientError {
    /// Server-side rejection text, if the server answered at all.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub use api::ApiClient;
pub use session::DebateSession;
