//! Error type shared by the network helpers and configuration loading.

/// Failures surfaced by chat requests and setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid chat config: {0}")]
    Config(String),
}

impl ChatError {
    /// Whether this failure happened below the application protocol
    /// (network, HTTP status, unreadable body) and is worth retrying.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus(_) | Self::Decode(_))
    }
}
