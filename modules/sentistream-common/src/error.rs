use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentiStreamError {
    /// Transient or terminal provider failure. The pipeline downgrades this
    /// to normal completion, keeping whatever was fetched so far.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider throttled us. Handled exactly like any other provider error.
    #[error("Provider rate limited")]
    RateLimited,

    /// Classifier failure. Fatal for the session, no partial-result handoff.
    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl SentiStreamError {
    /// Provider-originating errors end the stream gracefully instead of
    /// failing the session.
    pub fn is_provider(&self) -> bool {
        matches!(
            self,
            SentiStreamError::Provider(_) | SentiStreamError::RateLimited
        )
    }
}
