use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{QuoteSnapshot, RawArticle};

#[derive(Debug, Error)]
pub enum NewsProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

/// Capability interface for news/quote providers. The offline variant sits
/// behind the same trait so the pipeline never branches on credentials.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// General market news for a category (e.g. "general", "crypto")
    async fn fetch_general_news(
        &self,
        category: &str,
    ) -> Result<Vec<RawArticle>, NewsProviderError>;

    /// Company-specific news for a symbol within a date window
    async fn fetch_company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawArticle>, NewsProviderError>;

    /// Current quote snapshot for a symbol
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot, NewsProviderError>;
}
