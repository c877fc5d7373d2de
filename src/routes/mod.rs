pub(crate) mod bookmarks;
pub(crate) mod health;
pub(crate) mod news;
pub(crate) mod saved_searches;
