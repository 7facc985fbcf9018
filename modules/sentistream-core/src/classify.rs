//! Lexicon-backed polarity classifier.
//!
//! Mean valence of the sentiment-bearing words in the text, with simple
//! negation flipping. Magnitude lands in [-1, 1]; text with no
//! sentiment-bearing words scores 0.0 (neutral). Total: never returns Err.

use std::collections::{HashMap, HashSet};

use sentistream_common::SentiStreamError;

use crate::traits::Classifier;

const POSITIVE: &[(&str, f64)] = &[
    ("amazing", 0.8),
    ("awesome", 0.75),
    ("beautiful", 0.7),
    ("best", 0.8),
    ("better", 0.4),
    ("brilliant", 0.8),
    ("enjoy", 0.5),
    ("excellent", 0.8),
    ("excited", 0.6),
    ("fantastic", 0.8),
    ("glad", 0.5),
    ("good", 0.5),
    ("great", 0.7),
    ("happy", 0.6),
    ("impressive", 0.6),
    ("incredible", 0.85),
    ("love", 0.7),
    ("loved", 0.7),
    ("nice", 0.45),
    ("perfect", 0.85),
    ("promising", 0.55),
    ("recommend", 0.5),
    ("solid", 0.4),
    ("success", 0.7),
    ("thanks", 0.4),
    ("win", 0.6),
    ("wonderful", 0.75),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("angry", -0.6),
    ("annoying", -0.5),
    ("awful", -0.8),
    ("bad", -0.5),
    ("broken", -0.55),
    ("disappointed", -0.6),
    ("disappointing", -0.6),
    ("disaster", -0.9),
    ("fail", -0.6),
    ("failure", -0.65),
    ("hate", -0.75),
    ("horrible", -0.85),
    ("lose", -0.5),
    ("lost", -0.5),
    ("mess", -0.5),
    ("poor", -0.5),
    ("problem", -0.4),
    ("sad", -0.5),
    ("scam", -0.9),
    ("slow", -0.35),
    ("terrible", -0.8),
    ("ugly", -0.55),
    ("useless", -0.7),
    ("waste", -0.6),
    ("worst", -0.85),
    ("wrong", -0.45),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "dont", "doesnt", "didnt", "cant",
    "couldnt", "wont", "wouldnt", "shouldnt", "isnt", "arent", "wasnt", "werent",
];

pub struct LexiconClassifier {
    valence: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let valence = POSITIVE.iter().chain(NEGATIVE.iter()).copied().collect();
        let negations = NEGATIONS.iter().copied().collect();
        Self { valence, negations }
    }

    fn magnitude(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut hits = 0u32;
        let mut negated = false;

        for token in tokens(text) {
            if self.negations.contains(token.as_str()) {
                negated = true;
                continue;
            }
            if let Some(&valence) = self.valence.get(token.as_str()) {
                sum += if negated { -valence } else { valence };
                hits += 1;
            }
            negated = false;
        }

        if hits == 0 {
            return 0.0;
        }
        (sum / hits as f64).clamp(-1.0, 1.0)
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<f64, SentiStreamError> {
        Ok(self.magnitude(text))
    }
}

/// Lowercased alphanumeric runs; apostrophes are dropped so "don't" matches
/// the "dont" negation entry.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('\'', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_above_zero() {
        let c = LexiconClassifier::new();
        assert!(c.classify("what a great launch, love it").unwrap() > 0.0);
    }

    #[test]
    fn negative_text_scores_below_zero() {
        let c = LexiconClassifier::new();
        assert!(c.classify("terrible rollout, total disaster").unwrap() < 0.0);
    }

    #[test]
    fn neutral_text_scores_zero() {
        let c = LexiconClassifier::new();
        assert_eq!(c.classify("the meeting is at noon on tuesday").unwrap(), 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let c = LexiconClassifier::new();
        assert_eq!(c.classify("").unwrap(), 0.0);
    }

    #[test]
    fn negation_flips_valence() {
        let c = LexiconClassifier::new();
        assert!(c.classify("not good").unwrap() < 0.0);
        assert!(c.classify("don't love it").unwrap() < 0.0);
    }

    #[test]
    fn case_insensitive_lookup() {
        let c = LexiconClassifier::new();
        assert!(c.classify("GREAT stuff").unwrap() > 0.0);
    }

    #[test]
    fn magnitude_stays_in_unit_range() {
        let c = LexiconClassifier::new();
        let m = c.classify("perfect incredible amazing best").unwrap();
        assert!((-1.0..=1.0).contains(&m));
    }
}
