use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChirpError>;

#[derive(Debug, Error)]
pub enum ChirpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ChirpError {
    fn from(err: reqwest::Error) -> Self {
        ChirpError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ChirpError {
    fn from(err: serde_json::Error) -> Self {
        ChirpError::Parse(err.to_string())
    }
}
