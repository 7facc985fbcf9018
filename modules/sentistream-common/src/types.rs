use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Sentiment label derived from the sign of the classifier magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Negative,
    Neutral,
    Positive,
}

impl Polarity {
    /// Label for a raw classifier magnitude: zero is neutral, sign decides
    /// the rest.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude == 0.0 {
            Polarity::Neutral
        } else if magnitude < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Negative => write!(f, "negative"),
            Polarity::Neutral => write!(f, "neutral"),
            Polarity::Positive => write!(f, "positive"),
        }
    }
}

/// Accumulated weighted score per label. Owned by exactly one session and
/// mutated only by its pipeline; append-only, no corrections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityTotals {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl PolarityTotals {
    pub fn add(&mut self, label: Polarity, score: f64) {
        match label {
            Polarity::Negative => self.negative += score,
            Polarity::Neutral => self.neutral += score,
            Polarity::Positive => self.positive += score,
        }
    }

    pub fn get(&self, label: Polarity) -> f64 {
        match label {
            Polarity::Negative => self.negative,
            Polarity::Neutral => self.neutral,
            Polarity::Positive => self.positive,
        }
    }
}

/// A normalized post as it comes off the provider cursor, before the
/// pipeline assigns an ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedPost {
    pub source_id: String,
    pub author_handle: String,
    pub author_name: String,
    /// Provider timestamps are UTC; converted for display.
    pub posted_at: DateTime<Local>,
    pub location: String,
    pub like_count: i64,
    pub repost_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub text: String,
    pub permalink: String,
}

/// One fetched item with its position in the session's stream.
/// Ordinals are 1-based and strictly increasing, no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub ordinal: u32,
    #[serde(flatten)]
    pub post: FetchedPost,
}

impl PostRecord {
    pub fn new(ordinal: u32, post: FetchedPost) -> Self {
        Self { ordinal, post }
    }
}

/// A record plus its sentiment label and engagement-weighted score.
/// The score is always >= 1.0 and independent of the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    #[serde(flatten)]
    pub record: PostRecord,
    pub polarity: Polarity,
    #[serde(rename = "polarity_score")]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post() -> FetchedPost {
        FetchedPost {
            source_id: "42".to_string(),
            author_handle: "jdoe".to_string(),
            author_name: "Jane Doe".to_string(),
            posted_at: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            location: "Minneapolis, MN".to_string(),
            like_count: 14,
            repost_count: 3,
            followers_count: 320,
            following_count: 185,
            text: "big announcement today".to_string(),
            permalink: "https://chirp.social/jdoe/status/42".to_string(),
        }
    }

    #[test]
    fn polarity_from_magnitude_sign() {
        assert_eq!(Polarity::from_magnitude(0.0), Polarity::Neutral);
        assert_eq!(Polarity::from_magnitude(-0.3), Polarity::Negative);
        assert_eq!(Polarity::from_magnitude(0.7), Polarity::Positive);
    }

    #[test]
    fn totals_accumulate_per_label() {
        let mut totals = PolarityTotals::default();
        totals.add(Polarity::Positive, 1.2);
        totals.add(Polarity::Positive, 1.05);
        totals.add(Polarity::Negative, 1.0);
        assert_eq!(totals.get(Polarity::Positive), 1.2 + 1.05);
        assert_eq!(totals.get(Polarity::Negative), 1.0);
        assert_eq!(totals.get(Polarity::Neutral), 0.0);
    }

    #[test]
    fn scored_post_serializes_flat() {
        let scored = ScoredPost {
            record: PostRecord::new(1, sample_post()),
            polarity: Polarity::Positive,
            score: 1.17,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["ordinal"], 1);
        assert_eq!(value["source_id"], "42");
        assert_eq!(value["polarity"], "positive");
        assert_eq!(value["polarity_score"], 1.17);
    }
}
