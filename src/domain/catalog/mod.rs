//! Catalog domain module.
//!
//! Knowledge-hub articles, topic categories, and the search and feed
//! filters shared by the hub and the question board.

mod article;
mod category;
mod filters;

pub use article::Article;
pub use category::{BadgeStyle, CategoryIcon, Palette, TopicCategory};
pub use filters::{filter_articles, filter_questions, matches_search, QuestionFeed};
