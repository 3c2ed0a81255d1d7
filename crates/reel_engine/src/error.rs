use thiserror::Error;

pub const NETWORK_MESSAGE: &str = "The network misbehaved, search failed.";
pub const NO_RESULTS_MESSAGE: &str = "The search returned nothing.";

/// Failure of one exchange with the remote movie database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no results")]
    NoResults,
    #[error("not found: {0}")]
    NotFound(String),
    /// Superseded by a newer request; never shown to the user.
    #[error("cancelled")]
    Cancelled,
}

impl FetchError {
    /// Single human-readable string shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NoResults | FetchError::NotFound(_) => NO_RESULTS_MESSAGE,
            FetchError::Network(_)
            | FetchError::HttpStatus(_)
            | FetchError::Timeout
            | FetchError::Decode(_)
            | FetchError::Cancelled => NETWORK_MESSAGE,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
