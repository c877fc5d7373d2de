use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment classification for news text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Coarse urgency tier derived from article recency and sentiment magnitude
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

/// Raw article as returned by the external news provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub headline: String,
    pub source: String,
    /// Publication time as epoch seconds
    pub datetime: i64,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// An annotated news article. Immutable once built; a re-fetch produces a
/// new value that supersedes any stale cached one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub sentiment_label: SentimentLabel,
    /// Length-normalized (comparative) sentiment score
    pub sentiment_score: f64,
    pub impact: Impact,
}

/// Point-in-time quote snapshot for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub current_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub open_price: f64,
    pub previous_close: f64,
    pub timestamp: DateTime<Utc>,
}

/// Request parameters for the news search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQueryParams {
    /// Ticker symbol to search company news for
    pub q: Option<String>,
    /// General news category (e.g. "general", "crypto")
    pub category: Option<String>,
    /// Page number, 1-based (default: 1)
    pub page: Option<u32>,
    /// Page size, at most 50 (default: 20)
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}
