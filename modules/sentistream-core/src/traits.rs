// Trait abstractions for the pipeline's external collaborators.
//
// PostSource — the strictly sequential provider cursor; one record per call.
// Classifier — cleaned text in, raw polarity magnitude out.
// UpdateSink — the addressed push channel to a connected session.
// ReportBuilder — receives the final ordered result set; owns its artifacts.
//
// These enable deterministic testing with ScriptedSource, FixedClassifier and
// a recording sink: no network, no websocket. `cargo test` in seconds.

use async_trait::async_trait;

use sentistream_common::{FetchedPost, ScoredPost, SentiStreamError, ServerEvent};

#[async_trait]
pub trait PostSource: Send {
    /// Pull the next record off the cursor. `Ok(None)` means the result set
    /// is exhausted; errors are provider failures (transient or rate-limit).
    async fn next(&mut self) -> Result<Option<FetchedPost>, SentiStreamError>;
}

pub trait Classifier: Send + Sync {
    /// Raw polarity magnitude for cleaned text. Zero means neutral; only the
    /// sign feeds the label decision.
    fn classify(&self, text: &str) -> Result<f64, SentiStreamError>;
}

#[async_trait]
pub trait UpdateSink: Send + Sync {
    /// Push one event to the named session. The pipeline holds no other
    /// yield point, so emit is where it cooperates with the host loop.
    async fn emit(&self, session_id: &str, event: ServerEvent) -> Result<(), SentiStreamError>;
}

#[async_trait]
pub trait ReportBuilder: Send + Sync {
    /// Hand off the completed, ordered result set.
    async fn build(
        &self,
        session_id: &str,
        search_key: &str,
        posts: &[ScoredPost],
    ) -> Result<(), SentiStreamError>;

    /// Remove any artifacts previously built for the session.
    async fn purge(&self, session_id: &str) -> Result<(), SentiStreamError>;
}
