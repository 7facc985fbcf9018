//! The per-session fetch–score–aggregate–push loop.
//!
//! One pipeline per session. Pulls records off the provider cursor one at a
//! time, scores them, folds them into the session's running totals, and
//! pushes an incremental update per item. Provider failures mid-stream end
//! the loop as if the cursor ran dry; the partial result set survives.

use tracing::{debug, error, info, warn};

use sentistream_common::{
    Polarity, PolarityTotals, PostRecord, ScoredPost, SentiStreamError, ServerEvent,
};

use crate::aggregate::PolarityAggregator;
use crate::engagement::{scale, weighted_score};
use crate::normalize::normalize;
use crate::traits::{Classifier, PostSource, UpdateSink};

/// Why the fetch loop stopped. Clients cannot tell these apart; both end the
/// stream as a normal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Exhausted,
    ProviderTruncated,
}

/// Terminal payload: the ordered result set and final totals, ready for the
/// report stage.
#[derive(Debug)]
pub struct SessionOutcome {
    pub posts: Vec<ScoredPost>,
    pub totals: PolarityTotals,
    pub reason: EndReason,
}

/// Summary counters for one session run.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub fetched: u32,
    pub negative: u32,
    pub neutral: u32,
    pub positive: u32,
}

impl SessionStats {
    pub fn tally(posts: &[ScoredPost]) -> Self {
        let mut stats = Self {
            fetched: posts.len() as u32,
            ..Self::default()
        };
        for post in posts {
            match post.polarity {
                Polarity::Negative => stats.negative += 1,
                Polarity::Neutral => stats.neutral += 1,
                Polarity::Positive => stats.positive += 1,
            }
        }
        stats
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} posts ({} negative, {} neutral, {} positive)",
            self.fetched, self.negative, self.neutral, self.positive
        )
    }
}

pub struct SessionPipeline {
    session_id: String,
    search_key: String,
    requested: u32,
}

impl SessionPipeline {
    pub fn new(session_id: impl Into<String>, search_key: impl Into<String>, requested: u32) -> Self {
        Self {
            session_id: session_id.into(),
            search_key: search_key.into(),
            requested,
        }
    }

    /// Run the session to a terminal state. `Ok` is a completed stream
    /// (possibly truncated by the provider); `Err` is a fatal session error —
    /// classification or delivery — with no partial-result guarantee.
    pub async fn run(
        &self,
        source: &mut dyn PostSource,
        classifier: &dyn Classifier,
        sink: &dyn UpdateSink,
    ) -> Result<SessionOutcome, SentiStreamError> {
        info!(
            session = %self.session_id,
            search_key = %self.search_key,
            requested = self.requested,
            "Session stream starting"
        );

        let mut aggregator = PolarityAggregator::new();
        let mut posts: Vec<ScoredPost> = Vec::new();

        let reason = loop {
            if posts.len() as u32 >= self.requested {
                break EndReason::Exhausted;
            }
            match source.next().await {
                Ok(Some(fetched)) => {
                    let ordinal = posts.len() as u32 + 1;
                    let scored = match self.score_item(classifier, ordinal, fetched) {
                        Ok(scored) => scored,
                        Err(err) => {
                            error!(
                                session = %self.session_id,
                                error = %err,
                                "Classification failed, aborting session"
                            );
                            return Err(err);
                        }
                    };

                    aggregator.update(scored.polarity, scored.score);
                    let snapshot = aggregator.snapshot();
                    posts.push(scored.clone());

                    debug!(
                        session = %self.session_id,
                        ordinal,
                        polarity = %scored.polarity,
                        score = scored.score,
                        "Scored post"
                    );

                    sink.emit(
                        &self.session_id,
                        ServerEvent::PostUpdate {
                            post: scored,
                            total_polarity: snapshot,
                        },
                    )
                    .await?;
                }
                Ok(None) => break EndReason::Exhausted,
                Err(err) if err.is_provider() => {
                    warn!(
                        session = %self.session_id,
                        error = %err,
                        "Provider ended the stream early, keeping partial results"
                    );
                    break EndReason::ProviderTruncated;
                }
                Err(err) => return Err(err),
            }
        };

        let stats = SessionStats::tally(&posts);
        info!(session = %self.session_id, %stats, reason = ?reason, "Session stream complete");

        Ok(SessionOutcome {
            totals: aggregator.snapshot(),
            posts,
            reason,
        })
    }

    fn score_item(
        &self,
        classifier: &dyn Classifier,
        ordinal: u32,
        fetched: sentistream_common::FetchedPost,
    ) -> Result<ScoredPost, SentiStreamError> {
        let clean = normalize(&fetched.text);
        let magnitude = classifier.classify(&clean)?;
        let (normalized_like, normalized_repost) = scale(fetched.like_count, fetched.repost_count);

        Ok(ScoredPost {
            record: PostRecord::new(ordinal, fetched),
            polarity: Polarity::from_magnitude(magnitude),
            score: weighted_score(normalized_like, normalized_repost),
        })
    }
}
