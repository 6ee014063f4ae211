//! Error types for the FX summary service.

/// Failures talking to the remote rate provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Request timed out")]
    Timeout,

    #[error("Provider returned server error: HTTP {status}")]
    Server { status: u16 },

    #[error("Provider rejected request: HTTP {status}")]
    Client { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Could not decode provider response: {0}")]
    Decode(String),

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Only client errors (4xx) are final; everything else is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Timeout
            | ProviderError::Server { .. }
            | ProviderError::Transport(_)
            | ProviderError::Decode(_) => true,
            ProviderError::Client { .. } | ProviderError::RetriesExhausted { .. } => false,
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable request: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
