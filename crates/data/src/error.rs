use thiserror::Error;

/// Failures talking to the backend or third-party services.
#[derive(Debug, Error)]
pub enum DataError {
    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Domain(#[from] earn_domain::error::DomainError),
}

pub type Result<T> = std::result::Result<T, DataError>;
