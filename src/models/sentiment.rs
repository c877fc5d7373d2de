use serde::{Deserialize, Serialize};

use crate::models::SentimentLabel;

/// Result of scoring a piece of text against the sentiment lexicon.
/// Transient: never persisted on its own, only embedded into an Article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    /// Sum of per-token lexicon weights
    pub score: i64,
    /// Score normalized by token count (0 when the text has no tokens)
    pub comparative: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            score: 0,
            comparative: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}
