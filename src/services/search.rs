use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::news_provider::NewsProvider;
use crate::models::{
    Article, Pagination, QuoteSnapshot, RawArticle, SearchQueryParams, SearchResponse,
};
use crate::services::cache::{cache_key, NewsCache};
use crate::services::impact::classify_impact;
use crate::services::sentiment::analyze_sentiment;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Trailing window for company-specific news
const COMPANY_NEWS_DAYS: i64 = 7;

/// What a search request is scoped to, after validation
enum SearchScope {
    Symbol(String),
    Category(String),
}

impl SearchScope {
    fn from_params(params: &SearchQueryParams) -> Result<Self, AppError> {
        if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            return Ok(SearchScope::Symbol(q.to_uppercase()));
        }
        if let Some(cat) = params
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            return Ok(SearchScope::Category(cat.to_lowercase()));
        }
        Err(AppError::Validation(
            "Either q or category must be provided".to_string(),
        ))
    }

    fn cache_key(&self, page: u32, limit: u32) -> String {
        match self {
            SearchScope::Symbol(symbol) => cache_key("q", symbol, page, limit),
            SearchScope::Category(category) => cache_key("c", category, page, limit),
        }
    }
}

/// Orchestrates a single search request:
/// cache check -> provider fetch -> annotate -> persist -> paginate.
/// Steps run strictly sequentially; concurrent identical misses may each
/// fetch and write independently (last writer wins, a benign race).
pub struct NewsSearchService {
    provider: Arc<dyn NewsProvider>,
    cache: Arc<NewsCache>,
}

impl NewsSearchService {
    pub fn new(provider: Arc<dyn NewsProvider>, cache: Arc<NewsCache>) -> Self {
        Self { provider, cache }
    }

    pub async fn search(&self, params: &SearchQueryParams) -> Result<SearchResponse, AppError> {
        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        // Out-of-range paging is rejected up front, never clamped silently
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if limit < 1 {
            return Err(AppError::Validation("limit must be at least 1".to_string()));
        }
        if limit > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "limit must not exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        let scope = SearchScope::from_params(params)?;
        let key = scope.cache_key(page, limit);

        if let Some(articles) = self.cache.lookup(&key).await {
            return Ok(paginate(articles, page, limit));
        }

        let raw = match &scope {
            SearchScope::Symbol(symbol) => {
                let to = Utc::now().date_naive();
                let from = to - Duration::days(COMPANY_NEWS_DAYS);
                info!("Fetching company news for {} ({} to {})", symbol, from, to);
                self.provider.fetch_company_news(symbol, from, to).await?
            }
            SearchScope::Category(category) => {
                info!("Fetching general news for category {}", category);
                self.provider.fetch_general_news(category).await?
            }
        };

        if raw.is_empty() {
            warn!("Provider returned no articles for key {}", key);
        }

        let now = Utc::now();
        let articles: Vec<Article> = raw
            .into_iter()
            .map(|article| annotate_article(article, now))
            .collect();

        // Empty result sets are persisted too, so the TTL window shields the
        // provider from repeated empty searches.
        self.cache
            .store(&key, &articles, self.cache.default_ttl_seconds())
            .await;

        Ok(paginate(articles, page, limit))
    }

    pub async fn quote(&self, symbol: &str) -> Result<QuoteSnapshot, AppError> {
        let symbol = symbol.trim().to_uppercase();

        let valid = !symbol.is_empty()
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid {
            return Err(AppError::Validation(format!("Invalid symbol: {}", symbol)));
        }

        Ok(self.provider.fetch_quote(&symbol).await?)
    }
}

/// Run a raw article through sentiment scoring and impact classification.
/// The comparative (length-normalized) score is what the article carries.
fn annotate_article(raw: RawArticle, now: DateTime<Utc>) -> Article {
    let text = format!("{} {}", raw.headline, raw.summary);
    let sentiment = analyze_sentiment(&text);

    let published_at = DateTime::<Utc>::from_timestamp(raw.datetime, 0).unwrap_or(now);
    let impact = classify_impact(published_at, sentiment.comparative, now);

    Article {
        title: raw.headline,
        source: raw.source,
        published_at,
        description: raw.summary,
        url: raw.url,
        image: raw.image,
        category: raw.category,
        sentiment_label: sentiment.label,
        sentiment_score: sentiment.comparative,
        impact,
    }
}

fn paginate(articles: Vec<Article>, page: u32, limit: u32) -> SearchResponse {
    let total = articles.len();
    let start = ((page - 1) as usize).saturating_mul(limit as usize);
    let end = start.saturating_add(limit as usize).min(total);

    let slice = if start >= total {
        Vec::new()
    } else {
        articles[start..end].to_vec()
    };

    SearchResponse {
        articles: slice,
        pagination: Pagination {
            page,
            limit,
            total,
            has_more: (page as usize) * (limit as usize) < total,
        },
    }
}
