use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::external::news_provider::{NewsProvider, NewsProviderError};
use crate::models::{QuoteSnapshot, RawArticle};

/// (headline template, summary template, source)
/// Templates rotate so repeated fetches look plausible without a credential.
const ARTICLE_TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "{} shares surge after record quarterly earnings beat",
        "The company posted record revenue and strong profit growth, beating analyst estimates and prompting several upgrades.",
        "MarketWatch",
    ),
    (
        "{} stock plunges as weak guidance sparks selloff",
        "Shares tumbled after management issued a disappointing outlook, citing weak demand and shrinking margins amid rising costs.",
        "Reuters",
    ),
    (
        "{} announces quarterly dividend, schedules investor day",
        "The board declared a regular quarterly dividend and confirmed the date of its annual investor presentation.",
        "Business Wire",
    ),
    (
        "Analysts see upside for {} on strong product momentum",
        "A string of bullish notes highlighted robust demand and expected the rally to continue through year end.",
        "Bloomberg",
    ),
    (
        "{} faces regulatory probe over disclosure practices",
        "Regulators opened an investigation into the company's reporting, a setback that raises the risk of penalties and losses.",
        "Financial Times",
    ),
    (
        "{} completes acquisition of software unit",
        "The previously announced transaction closed on schedule; integration is expected to take several quarters.",
        "PR Newswire",
    ),
    (
        "{} cuts workforce amid restructuring push",
        "The layoffs are part of a broader cost reduction plan after a decline in sales and a miss on quarterly targets.",
        "CNBC",
    ),
    (
        "{} expands partnership to boost cloud growth",
        "The extended deal is expected to accelerate growth in recurring revenue, a win analysts called a positive catalyst.",
        "TechCrunch",
    ),
];

/// Offline provider used when no API credential is configured. Articles are
/// synthesized deterministically from the requested subject so demo runs are
/// stable across restarts.
pub struct OfflineProvider;

impl OfflineProvider {
    pub fn new() -> Self {
        info!("📰 News provider running in offline mode (no credential configured)");
        Self
    }

    fn synthesize(&self, subject: &str) -> Vec<RawArticle> {
        let now = Utc::now();

        ARTICLE_TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, (headline, summary, source))| {
                // Stagger publication times so impact tiers vary: the first
                // few fall inside the 2h window, later ones age out.
                let published = now - Duration::minutes(45 * (i as i64 + 1));

                RawArticle {
                    headline: headline.replace("{}", subject),
                    source: source.to_string(),
                    datetime: published.timestamp(),
                    summary: summary.to_string(),
                    url: format!(
                        "https://news.example.com/{}/{}",
                        subject.to_lowercase(),
                        i
                    ),
                    image: None,
                    category: Some("company".to_string()),
                }
            })
            .collect()
    }
}

impl Default for OfflineProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsProvider for OfflineProvider {
    async fn fetch_general_news(
        &self,
        category: &str,
    ) -> Result<Vec<RawArticle>, NewsProviderError> {
        let subject = match category {
            "general" => "Markets",
            other => other,
        };
        let mut articles = self.synthesize(subject);
        for article in &mut articles {
            article.category = Some(category.to_string());
        }
        Ok(articles)
    }

    async fn fetch_company_news(
        &self,
        symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<RawArticle>, NewsProviderError> {
        Ok(self.synthesize(symbol))
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot, NewsProviderError> {
        // Derive a stable base price from the symbol so quotes are consistent
        let seed: u32 = symbol.bytes().map(u32::from).sum();
        let base = 40.0 + f64::from(seed % 400);

        Ok(QuoteSnapshot {
            symbol: symbol.to_string(),
            current_price: base,
            high_price: base * 1.02,
            low_price: base * 0.97,
            open_price: base * 0.99,
            previous_close: base * 0.985,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn synthesized_articles_are_well_formed() {
        let provider = OfflineProvider::new();
        let today = Utc::now().date_naive();

        let articles = provider
            .fetch_company_news("AAPL", today - Duration::days(7), today)
            .await
            .unwrap();

        assert_eq!(articles.len(), ARTICLE_TEMPLATES.len());
        for article in &articles {
            assert!(article.headline.contains("AAPL"));
            assert!(!article.url.is_empty());
            assert!(article.datetime <= Utc::now().timestamp());
        }
    }

    #[tokio::test]
    async fn quotes_are_deterministic_per_symbol() {
        let provider = OfflineProvider::new();

        let a = provider.fetch_quote("MSFT").await.unwrap();
        let b = provider.fetch_quote("MSFT").await.unwrap();

        assert_eq!(a.current_price, b.current_price);
        assert!(a.high_price > a.low_price);
    }
}
