//! Sample catalog loader.
//!
//! Reads question threads and knowledge-hub articles from YAML. The
//! built-in catalog is compiled into the binary; `from_path` loads an
//! operator-supplied file with the same layout.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::catalog::Article;
use crate::domain::foundation::{AnswerId, DomainError, QuestionId, Timestamp, UserId};
use crate::domain::qna::{Answer, Author, Privacy, QnaError, Question, QuestionThread};
use crate::domain::voting::{UserVote, VoteTally};

const BUILTIN_CATALOG: &str = include_str!("sample_catalog.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid catalog entry: {0}")]
    Invalid(String),
}

impl From<DomainError> for SeedError {
    fn from(err: DomainError) -> Self {
        SeedError::Invalid(err.to_string())
    }
}

impl From<QnaError> for SeedError {
    fn from(err: QnaError) -> Self {
        SeedError::Invalid(err.message())
    }
}

/// Question threads and articles ready to load into adapters.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub threads: Vec<QuestionThread>,
    pub articles: Vec<Article>,
}

impl SampleCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SeedError> {
        let raw: RawCatalog = serde_yaml::from_str(yaml)?;
        raw.into_catalog(&Timestamp::now())
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let yaml = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_yaml_str(&yaml)
    }

    pub fn thread(&self, id: &QuestionId) -> Option<&QuestionThread> {
        self.threads.iter().find(|t| t.id() == id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File layout
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    questions: Vec<RawQuestion>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: QuestionId,
    author_id: UserId,
    author: Author,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    privacy: Privacy,
    #[serde(default)]
    votes: i64,
    #[serde(default)]
    user_vote: UserVote,
    #[serde(default)]
    answer_count: u32,
    #[serde(default)]
    views: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: bool,
    #[serde(default)]
    asked_minutes_ago: i64,
    #[serde(default)]
    answers: Vec<RawAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    id: AnswerId,
    author: Author,
    content: String,
    #[serde(default)]
    votes: i64,
    #[serde(default)]
    user_vote: UserVote,
    #[serde(default)]
    accepted: bool,
    #[serde(default)]
    comments: u32,
    #[serde(default)]
    answered_minutes_ago: i64,
}

impl RawCatalog {
    fn into_catalog(self, now: &Timestamp) -> Result<SampleCatalog, SeedError> {
        let threads = self
            .questions
            .into_iter()
            .map(|q| q.into_thread(now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SampleCatalog {
            threads,
            articles: self.articles,
        })
    }
}

impl RawQuestion {
    fn into_thread(self, now: &Timestamp) -> Result<QuestionThread, SeedError> {
        let question_id = self.id;
        let question = Question::new(
            question_id,
            self.author_id,
            self.author,
            self.title,
            self.description,
            self.tags,
            self.privacy,
        )?
        .with_counters(
            VoteTally::new(self.votes, self.user_vote),
            self.answer_count,
            self.views,
            self.followers,
        )
        .followed(self.following)
        .with_created_at(now.minus_minutes(self.asked_minutes_ago));

        let answers = self
            .answers
            .into_iter()
            .map(|a| {
                Ok(Answer::new(a.id, question_id, a.author, a.content)?
                    .with_counters(VoteTally::new(a.votes, a.user_vote), a.comments)
                    .accepted(a.accepted)
                    .with_created_at(now.minus_minutes(a.answered_minutes_ago)))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(QuestionThread::from_parts(question, answers)?)
    }
}
