//! Running per-session polarity totals.
//!
//! Owned by exactly one session pipeline and passed by reference into the
//! steps that need it — never a shared global.

use sentistream_common::{Polarity, PolarityTotals};

#[derive(Debug, Default)]
pub struct PolarityAggregator {
    totals: PolarityTotals,
}

impl PolarityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weighted score to the label's running total. Append-only.
    pub fn update(&mut self, label: Polarity, score: f64) {
        self.totals.add(label, score);
    }

    /// Current totals by value. A snapshot never shows a partial update.
    pub fn snapshot(&self) -> PolarityTotals {
        self.totals.clone()
    }
}
