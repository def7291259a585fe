//! Knowledge-hub articles.

use serde::{Deserialize, Serialize};

use super::TopicCategory;
use crate::domain::foundation::ArticleId;

/// A published knowledge-hub article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: ArticleId,
    pub title: String,
    pub summary: String,
    pub category: TopicCategory,
    pub author: String,
    #[serde(default)]
    pub read_minutes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// "8 min read"
    pub fn read_time_label(&self) -> String {
        format!("{} min read", self.read_minutes.max(1))
    }
}
