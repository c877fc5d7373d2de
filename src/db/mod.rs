pub mod bookmark_queries;
pub mod cache_queries;
pub mod saved_search_queries;
