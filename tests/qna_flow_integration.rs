//! Integration tests for the question board interaction flow.
//!
//! These tests drive the handlers through the in-memory adapters:
//! 1. Handler applies the change optimistically and saves the thread
//! 2. InMemoryCommunityBackend confirms it with authoritative counts
//! 3. InMemoryEventBus delivers the stamped event to subscribers
//! 4. An offline backend leaves the board and drafts as they were

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aquaveda::adapters::{
    AuthorAcceptancePolicy, InMemoryCommunityBackend, InMemoryEventBus,
    InMemoryQuestionRepository, SampleCatalog, ALL_EVENTS,
};
use aquaveda::application::{
    AcceptAnswerCommand, AcceptAnswerHandler, AskQuestionCommand, AskQuestionHandler,
    CastVoteCommand, CastVoteHandler, ListQuestionsHandler, ListQuestionsQuery,
    StartDiscussionHandler, SubmitCommentHandler, ToggleFollowCommand, ToggleFollowHandler,
    WithdrawAcceptanceCommand, WithdrawAcceptanceHandler,
};
use aquaveda::domain::catalog::QuestionFeed;
use aquaveda::domain::drafts::{CommentDraft, NewPostDraft, NewQuestionDraft};
use aquaveda::domain::foundation::{CommandMetadata, DomainError, ErrorCode, EventEnvelope, UserId};
use aquaveda::domain::qna::{Author, QnaError};
use aquaveda::domain::voting::{UserVote, Votable, VoteDirection};
use aquaveda::ports::{EventHandler, EventSubscriber, QuestionRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Board {
    catalog: SampleCatalog,
    repository: Arc<InMemoryQuestionRepository>,
    backend: Arc<InMemoryCommunityBackend>,
    bus: Arc<InMemoryEventBus>,
}

impl Board {
    fn seeded() -> Self {
        let catalog = SampleCatalog::builtin().unwrap();
        let repository = Arc::new(InMemoryQuestionRepository::with_threads(
            catalog.threads.clone(),
        ));
        let backend = Arc::new(InMemoryCommunityBackend::from_catalog(&catalog));
        Self {
            catalog,
            repository,
            backend,
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    fn votes(&self) -> CastVoteHandler {
        CastVoteHandler::new(self.repository.clone(), self.backend.clone(), self.bus.clone())
    }

    fn follows(&self) -> ToggleFollowHandler {
        ToggleFollowHandler::new(self.repository.clone(), self.backend.clone(), self.bus.clone())
    }

    fn comments(&self) -> SubmitCommentHandler {
        SubmitCommentHandler::new(self.repository.clone(), self.backend.clone(), self.bus.clone())
    }

    fn accepts(&self, allow_withdrawal: bool) -> AcceptAnswerHandler {
        AcceptAnswerHandler::new(
            self.repository.clone(),
            self.backend.clone(),
            Arc::new(AuthorAcceptancePolicy::new(allow_withdrawal)),
            self.bus.clone(),
        )
    }

    fn withdrawals(&self) -> WithdrawAcceptanceHandler {
        WithdrawAcceptanceHandler::new(
            self.repository.clone(),
            self.backend.clone(),
            Arc::new(AuthorAcceptancePolicy::new(true)),
            self.bus.clone(),
        )
    }

    fn asks(&self) -> AskQuestionHandler {
        AskQuestionHandler::new(self.repository.clone(), self.backend.clone(), self.bus.clone())
    }
}

fn as_user(user: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(user).unwrap()).with_correlation_id("flow-1")
}

/// Counts every delivered event
struct CountingHandler {
    seen: AtomicUsize,
}

#[async_trait]
impl EventHandler for CountingHandler {
    async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CountingHandler"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_session_reaches_backend_and_subscribers() {
    let board = Board::seeded();
    let counter = Arc::new(CountingHandler {
        seen: AtomicUsize::new(0),
    });
    board.bus.subscribe(ALL_EVENTS, counter.clone());

    let thread = &board.catalog.threads[0];
    let answer = &thread.answers()[0];

    // Vote
    let vote = board
        .votes()
        .handle(
            CastVoteCommand {
                item: answer.votable_item(),
                direction: VoteDirection::Up,
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap();
    assert_eq!(vote.tally.count, 19);
    assert_eq!(vote.tally.user_vote, UserVote::Up);
    assert_eq!(board.backend.vote_count(&answer.votable_item()).await, Some(19));

    // Follow
    let follow = board
        .follows()
        .handle(ToggleFollowCommand { question_id: *thread.id() }, as_user("sarah-chen"))
        .await
        .unwrap();
    assert!(follow.following);
    assert_eq!(follow.follower_count, 13);

    // Comment
    let mut draft = CommentDraft::new(*answer.id());
    draft.open().unwrap();
    draft.edit("What payback period did you see?").unwrap();
    let comment = board
        .comments()
        .handle(&mut draft, as_user("sarah-chen"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(comment.comment_count, 4);

    // Accept as the asker
    board
        .accepts(false)
        .handle(
            AcceptAnswerCommand {
                question_id: *thread.id(),
                answer_id: *answer.id(),
            },
            as_user("mike-thompson"),
        )
        .await
        .unwrap();
    assert_eq!(board.backend.accepted_answer(thread.id()).await, Some(*answer.id()));

    let stored = board.repository.find_thread(thread.id()).await.unwrap().unwrap();
    assert!(stored.question().has_accepted_answer());
    assert!(stored.question().is_following());
    assert_eq!(stored.answer(answer.id()).unwrap().comment_count(), 4);

    assert_eq!(board.bus.event_count(), 4);
    assert_eq!(counter.seen.load(Ordering::SeqCst), 4);
    assert!(board
        .bus
        .published_events()
        .iter()
        .all(|e| e.metadata.correlation_id.as_deref() == Some("flow-1")));
}

#[tokio::test]
async fn offline_backend_leaves_board_untouched() {
    let board = Board::seeded();
    board.backend.set_offline(true);
    let before = board.repository.list_questions().await.unwrap();
    let thread = &board.catalog.threads[1];

    let err = board
        .votes()
        .handle(
            CastVoteCommand {
                item: thread.question().votable_item(),
                direction: VoteDirection::Down,
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    let err = board
        .follows()
        .handle(ToggleFollowCommand { question_id: *thread.id() }, as_user("sarah-chen"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BackendUnavailable);

    let mut question = NewQuestionDraft::new();
    question.set_title("Drought-tolerant lawn alternatives?");
    question.add_tag("Xeriscaping");
    let snapshot = question.clone();
    board
        .asks()
        .handle(
            &mut question,
            AskQuestionCommand {
                author: Author::new("Dr. Sarah Chen", "Water Systems Engineer"),
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap_err();
    assert_eq!(question, snapshot);

    assert_eq!(board.repository.list_questions().await.unwrap(), before);
    assert_eq!(board.bus.event_count(), 0);

    // Back online, the same vote goes through.
    board.backend.set_offline(false);
    let vote = board
        .votes()
        .handle(
            CastVoteCommand {
                item: thread.question().votable_item(),
                direction: VoteDirection::Down,
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap();
    assert_eq!(vote.tally.count, 65);
    assert_eq!(vote.tally.user_vote, UserVote::Down);
}

#[tokio::test]
async fn acceptance_moves_and_withdraws() {
    let board = Board::seeded();
    let thread = &board.catalog.threads[0];
    let first = *thread.answers()[0].id();
    let second = *thread.answers()[1].id();

    for answer_id in [first, second] {
        board
            .accepts(true)
            .handle(
                AcceptAnswerCommand {
                    question_id: *thread.id(),
                    answer_id,
                },
                as_user("mike-thompson"),
            )
            .await
            .unwrap();
    }
    assert_eq!(board.backend.accepted_answer(thread.id()).await, Some(second));

    let withdrawn = board
        .withdrawals()
        .handle(
            WithdrawAcceptanceCommand {
                question_id: *thread.id(),
                answer_id: second,
            },
            as_user("mike-thompson"),
        )
        .await
        .unwrap();
    assert!(withdrawn.is_some());
    assert_eq!(board.backend.accepted_answer(thread.id()).await, None);

    let stored = board.repository.find_thread(thread.id()).await.unwrap().unwrap();
    assert!(stored.accepted_answer().is_none());
    assert!(!stored.question().has_accepted_answer());
    assert_eq!(
        board.bus.events_of_type("qna.answer_accepted.v1").len(),
        2
    );
}

#[tokio::test]
async fn non_asker_cannot_accept() {
    let board = Board::seeded();
    let thread = &board.catalog.threads[0];

    let err = board
        .accepts(true)
        .handle(
            AcceptAnswerCommand {
                question_id: *thread.id(),
                answer_id: *thread.answers()[0].id(),
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, QnaError::Forbidden(_)));
    assert_eq!(board.backend.accepted_answer(thread.id()).await, None);
}

#[tokio::test]
async fn asked_question_appears_under_unanswered() {
    let board = Board::seeded();
    let mut draft = NewQuestionDraft::new();
    draft.set_title("Measuring evapotranspiration on green roofs");
    draft.add_tag("Green Roofs");

    let asked = board
        .asks()
        .handle(
            &mut draft,
            AskQuestionCommand {
                author: Author::new("Dr. Sarah Chen", "Water Systems Engineer"),
            },
            as_user("sarah-chen"),
        )
        .await
        .unwrap();

    let unanswered = ListQuestionsHandler::new(board.repository.clone())
        .handle(ListQuestionsQuery {
            feed: QuestionFeed::Unanswered,
            search: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(unanswered.len(), 1);
    assert_eq!(unanswered[0].id(), asked.question.id());
    assert!(board.bus.has_event("qna.question_asked.v1"));
}

#[tokio::test]
async fn started_discussion_reaches_subscribers() {
    let board = Board::seeded();
    let counter = Arc::new(CountingHandler {
        seen: AtomicUsize::new(0),
    });
    board.bus.subscribe("qna.discussion_started.v1", counter.clone());

    let mut post = NewPostDraft::new();
    post.toggle();
    post.set_title("Rain barrel bulk order").unwrap();
    post.set_content("   ").unwrap();

    let handler = StartDiscussionHandler::new(board.bus.clone());
    let err = handler.handle(&mut post, as_user("sarah-chen")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(board.bus.event_count(), 0);

    post.set_content("Ordering 40 barrels in March, reply if you want in.").unwrap();
    handler.handle(&mut post, as_user("sarah-chen")).await.unwrap();

    assert!(!post.is_open());
    assert!(post.title().is_empty());
    assert_eq!(counter.seen.load(Ordering::SeqCst), 1);
    assert!(board.bus.has_event("qna.discussion_started.v1"));
}
