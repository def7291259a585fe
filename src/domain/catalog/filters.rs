//! Search and feed filters for the knowledge hub and question board.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Article, TopicCategory};
use crate::domain::foundation::ValidationError;
use crate::domain::qna::Question;
use crate::domain::voting::Votable;

/// Case-insensitive substring match over any of `fields`.
///
/// A blank query matches everything.
pub fn matches_search<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Articles whose title or summary match `query`, optionally limited to
/// one category.
pub fn filter_articles<'a>(
    articles: &'a [Article],
    category: Option<TopicCategory>,
    query: &str,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| category.map_or(true, |c| a.category == c))
        .filter(|a| matches_search(query, [a.title.as_str(), a.summary.as_str()]))
        .collect()
}

/// Tabs on the question board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionFeed {
    #[default]
    All,
    Unanswered,
    Trending,
    Following,
}

impl QuestionFeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFeed::All => "all",
            QuestionFeed::Unanswered => "unanswered",
            QuestionFeed::Trending => "trending",
            QuestionFeed::Following => "following",
        }
    }
}

impl fmt::Display for QuestionFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionFeed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(QuestionFeed::All),
            "unanswered" => Ok(QuestionFeed::Unanswered),
            "trending" => Ok(QuestionFeed::Trending),
            "following" => Ok(QuestionFeed::Following),
            _ => Err(ValidationError::invalid_format(
                "feed",
                format!("unknown feed '{}'", s),
            )),
        }
    }
}

/// Questions shown under `feed` whose title or description match `query`.
///
/// Input order is preserved except for `Trending`, which is ordered by
/// vote count and then views, highest first.
pub fn filter_questions<'a>(
    questions: impl IntoIterator<Item = &'a Question>,
    feed: QuestionFeed,
    query: &str,
) -> Vec<&'a Question> {
    let mut matched: Vec<&Question> = questions
        .into_iter()
        .filter(|q| match feed {
            QuestionFeed::All | QuestionFeed::Trending => true,
            QuestionFeed::Unanswered => q.answer_count() == 0,
            QuestionFeed::Following => q.is_following(),
        })
        .filter(|q| matches_search(query, [q.title(), q.description()]))
        .collect();

    if feed == QuestionFeed::Trending {
        matched.sort_by_key(|q| Reverse((q.tally().count, q.view_count())));
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ArticleId, QuestionId, UserId};
    use crate::domain::qna::{Author, Privacy};
    use crate::domain::voting::{UserVote, VoteTally};

    fn article(title: &str, summary: &str, category: TopicCategory) -> Article {
        Article {
            id: ArticleId::new(),
            title: title.to_string(),
            summary: summary.to_string(),
            category,
            author: "Dr. Sarah Chen".to_string(),
            read_minutes: 8,
            tags: vec![],
            views: 0,
            likes: 0,
            featured: false,
        }
    }

    fn question(title: &str, votes: i64, answers: u32, views: u32) -> Question {
        Question::new(
            QuestionId::new(),
            UserId::new("mike-thompson").unwrap(),
            Author::new("Mike Thompson", "Building Manager"),
            title,
            "",
            vec![],
            Privacy::Public,
        )
        .unwrap()
        .with_counters(VoteTally::new(votes, UserVote::None), answers, views, 0)
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_search("", ["anything"]));
        assert!(matches_search("   ", std::iter::empty::<&str>()));
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(matches_search("DRIP", ["Smart drip irrigation"]));
        assert!(!matches_search("cistern", ["Smart drip irrigation"]));
    }

    #[test]
    fn article_filter_combines_category_and_query() {
        let articles = vec![
            article("Smart Drip Irrigation", "IoT sensors", TopicCategory::Irrigation),
            article("Greywater in Apartments", "plumbing retrofits", TopicCategory::Greywater),
            article("Rural Rainwater", "community cisterns", TopicCategory::Rainwater),
        ];

        assert_eq!(filter_articles(&articles, None, "").len(), 3);
        assert_eq!(
            filter_articles(&articles, Some(TopicCategory::Greywater), "")[0].title,
            "Greywater in Apartments"
        );
        assert_eq!(filter_articles(&articles, None, "cisterns").len(), 1);
        assert!(filter_articles(&articles, Some(TopicCategory::Irrigation), "cisterns").is_empty());
    }

    #[test]
    fn unanswered_feed_keeps_zero_answer_questions() {
        let questions = vec![question("answered", 5, 2, 10), question("fresh", 0, 0, 1)];
        let feed = filter_questions(&questions, QuestionFeed::Unanswered, "");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].title(), "fresh");
    }

    #[test]
    fn following_feed_keeps_followed_questions() {
        let mut questions = vec![question("a", 0, 0, 0), question("b", 0, 0, 0)];
        questions[1].toggle_follow();
        let feed = filter_questions(&questions, QuestionFeed::Following, "");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].title(), "b");
    }

    #[test]
    fn trending_orders_by_votes_then_views() {
        let questions = vec![
            question("low", 3, 1, 500),
            question("tie-fewer-views", 24, 3, 100),
            question("tie-more-views", 24, 3, 156),
        ];
        let titles: Vec<&str> = filter_questions(&questions, QuestionFeed::Trending, "")
            .into_iter()
            .map(|q| q.title())
            .collect();
        assert_eq!(titles, vec!["tie-more-views", "tie-fewer-views", "low"]);
    }

    #[test]
    fn feed_parses_from_tab_name() {
        assert_eq!("trending".parse::<QuestionFeed>().unwrap(), QuestionFeed::Trending);
        assert!("hot".parse::<QuestionFeed>().is_err());
    }
}
