//! BrowseArticlesHandler - Query handler for the knowledge hub.

use std::sync::Arc;

use crate::domain::catalog::{filter_articles, Article, TopicCategory};

/// Query for hub articles, optionally limited to a category.
#[derive(Debug, Clone, Default)]
pub struct BrowseArticlesQuery {
    pub category: Option<TopicCategory>,
    pub search: String,
    pub featured_only: bool,
}

/// Handler for browsing articles. The article list is read-only.
pub struct BrowseArticlesHandler {
    articles: Arc<Vec<Article>>,
}

impl BrowseArticlesHandler {
    pub fn new(articles: Arc<Vec<Article>>) -> Self {
        Self { articles }
    }

    pub fn handle(&self, query: &BrowseArticlesQuery) -> Vec<Article> {
        filter_articles(&self.articles, query.category, &query.search)
            .into_iter()
            .filter(|a| !query.featured_only || a.featured)
            .cloned()
            .collect()
    }
}
