pub mod aggregate;
pub mod classify;
pub mod engagement;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod traits;

pub use aggregate::PolarityAggregator;
pub use classify::LexiconClassifier;
pub use normalize::normalize;
pub use pipeline::{EndReason, SessionOutcome, SessionPipeline, SessionStats};
pub use source::{CursorSource, SearchQuery};
pub use traits::{Classifier, PostSource, ReportBuilder, UpdateSink};
