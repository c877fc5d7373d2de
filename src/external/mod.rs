pub mod finnhub;
pub mod news_provider;
pub mod offline;
