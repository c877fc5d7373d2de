use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::external::news_provider::{NewsProvider, NewsProviderError};
use crate::models::{QuoteSnapshot, RawArticle};

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Upstream calls are bounded; a hung provider must not hold a request open.
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct FinnhubProvider {
    client: reqwest::Client,
    api_key: String,
}

impl FinnhubProvider {
    pub fn new(api_key: String) -> Result<Self, NewsProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NewsProviderError::Network(e.to_string()))?;

        Ok(Self { client, api_key })
    }

    pub fn from_env() -> Result<Self, NewsProviderError> {
        let api_key = std::env::var("FINNHUB_API_KEY")
            .map_err(|_| NewsProviderError::BadResponse("FINNHUB_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, NewsProviderError> {
        let url = format!("{}/{}", BASE_URL, path);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NewsProviderError::Timeout
                } else {
                    NewsProviderError::Network(e.to_string())
                }
            })?;

        if resp.status().as_u16() == 429 {
            return Err(NewsProviderError::RateLimited);
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NewsProviderError::BadResponse(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| NewsProviderError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubNewsItem {
    headline: String,
    source: String,
    datetime: i64,
    #[serde(default)]
    summary: String,
    url: String,
    image: Option<String>,
    category: Option<String>,
}

impl From<FinnhubNewsItem> for RawArticle {
    fn from(item: FinnhubNewsItem) -> Self {
        RawArticle {
            headline: item.headline,
            source: item.source,
            datetime: item.datetime,
            summary: item.summary,
            url: item.url,
            image: item.image.filter(|s| !s.is_empty()),
            category: item.category,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    #[serde(rename = "c")]
    current: f64,
    #[serde(rename = "h")]
    high: f64,
    #[serde(rename = "l")]
    low: f64,
    #[serde(rename = "o")]
    open: f64,
    #[serde(rename = "pc")]
    previous_close: f64,
    #[serde(rename = "t")]
    timestamp: i64,
}

#[async_trait]
impl NewsProvider for FinnhubProvider {
    async fn fetch_general_news(
        &self,
        category: &str,
    ) -> Result<Vec<RawArticle>, NewsProviderError> {
        let items: Vec<FinnhubNewsItem> =
            self.get_json("news", &[("category", category)]).await?;

        Ok(items.into_iter().map(RawArticle::from).collect())
    }

    async fn fetch_company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawArticle>, NewsProviderError> {
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();

        let items: Vec<FinnhubNewsItem> = self
            .get_json(
                "company-news",
                &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())],
            )
            .await?;

        Ok(items.into_iter().map(RawArticle::from).collect())
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot, NewsProviderError> {
        let quote: FinnhubQuote = self.get_json("quote", &[("symbol", symbol)]).await?;

        // Finnhub signals unknown symbols with an all-zero quote
        if quote.current == 0.0 && quote.timestamp == 0 {
            return Err(NewsProviderError::BadResponse(format!(
                "no quote data for symbol {}",
                symbol
            )));
        }

        let timestamp = DateTime::<Utc>::from_timestamp(quote.timestamp, 0)
            .ok_or_else(|| NewsProviderError::Parse("invalid quote timestamp".into()))?;

        Ok(QuoteSnapshot {
            symbol: symbol.to_string(),
            current_price: quote.current,
            high_price: quote.high,
            low_price: quote.low,
            open_price: quote.open,
            previous_close: quote.previous_close,
            timestamp,
        })
    }
}
