//! Demo session against the sample catalog.
//!
//! Configure with `AQUAVEDA__*` environment variables; see `config`.

use std::sync::Arc;

use aquaveda::adapters::{
    AuthorAcceptancePolicy, HttpCommunityBackend, InMemoryCommunityBackend, InMemoryEventBus,
    InMemoryQuestionRepository, LoggingEventHandler, SampleCatalog, ALL_EVENTS,
};
use aquaveda::application::{
    AcceptAnswerCommand, AcceptAnswerHandler, AskQuestionCommand, AskQuestionHandler,
    BrowseArticlesHandler, BrowseArticlesQuery, CastVoteCommand, CastVoteHandler,
    GetThreadHandler, GetThreadQuery, ListQuestionsHandler, ListQuestionsQuery,
    StartDiscussionHandler, SubmitCommentHandler, ToggleBookmarkCommand, ToggleBookmarkHandler,
    ToggleFollowCommand, ToggleFollowHandler, WithdrawAcceptanceCommand,
    WithdrawAcceptanceHandler,
};
use aquaveda::config::{AppConfig, BackendMode, ValidationError};
use aquaveda::domain::catalog::{QuestionFeed, TopicCategory};
use aquaveda::domain::drafts::{CommentDraft, NewPostDraft, NewQuestionDraft};
use aquaveda::domain::foundation::CommandMetadata;
use aquaveda::domain::profile::{ProfileDetails, ProfileEditor};
use aquaveda::domain::qna::{Privacy, QnaError};
use aquaveda::domain::voting::{Votable, VoteDirection};
use aquaveda::ports::{CommunityBackend, EventSubscriber, QuestionRepository};

type BoxError = Box<dyn std::error::Error>;

/// Logs a failed interaction the way the UI would show a toast.
fn report<T>(action: &str, result: Result<T, QnaError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                action,
                code = %err.code(),
                retryable = err.is_retryable(),
                "{}",
                err.message()
            );
            None
        }
    }
}

fn build_backend(
    config: &AppConfig,
    catalog: &SampleCatalog,
) -> Result<Arc<dyn CommunityBackend>, BoxError> {
    match config.backend.mode {
        BackendMode::InMemory => Ok(Arc::new(InMemoryCommunityBackend::from_catalog(catalog))),
        BackendMode::Http => {
            let http = config
                .backend
                .http_config()
                .ok_or(ValidationError::MissingRequired("BACKEND__BASE_URL"))?;
            Ok(Arc::new(HttpCommunityBackend::new(http)?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init_tracing()?;

    let catalog = SampleCatalog::builtin()?;
    let repository: Arc<dyn QuestionRepository> =
        Arc::new(InMemoryQuestionRepository::with_threads(catalog.threads.clone()));
    let backend = build_backend(&config, &catalog)?;
    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe(ALL_EVENTS, Arc::new(LoggingEventHandler));
    let policy = Arc::new(AuthorAcceptancePolicy::new(
        config.features.allow_answer_withdrawal,
    ));

    let user_id = config.session.user_id()?;
    let metadata = || CommandMetadata::new(user_id.clone());
    tracing::info!(user = %user_id, backend = ?config.backend.mode, "session started");

    // Board
    let trending = ListQuestionsHandler::new(repository.clone())
        .handle(ListQuestionsQuery {
            feed: QuestionFeed::Trending,
            search: String::new(),
        })
        .await?;
    for question in &trending {
        tracing::info!(
            votes = question.tally().count,
            answers = question.answer_count(),
            followers = question.follower_count(),
            "{}",
            question.title()
        );
    }

    let Some(thread) = catalog.threads.first() else {
        return Ok(());
    };
    let question_id = *thread.id();

    // Open the question page
    let page = GetThreadHandler::new(repository.clone())
        .handle(GetThreadQuery {
            question_id,
            record_view: true,
        })
        .await?;
    tracing::info!(views = page.question().view_count(), answers = page.answers().len(), "question opened");

    // Vote on the top answer
    if let Some(answer) = thread.answers().first() {
        let votes = CastVoteHandler::new(repository.clone(), backend.clone(), bus.clone())
            .with_optimistic_updates(config.features.optimistic_updates);
        let cmd = CastVoteCommand {
            item: answer.votable_item(),
            direction: VoteDirection::Up,
        };
        if let Some(result) = report("vote", votes.handle(cmd, metadata()).await) {
            tracing::info!(count = result.tally.count, vote = %result.tally.user_vote.as_str(), "answer vote confirmed");
        }

        // Comment on it
        let mut draft = CommentDraft::new(*answer.id());
        draft.open()?;
        draft.edit("Did the payback estimate include maintenance of the filters?")?;
        let comments = SubmitCommentHandler::new(repository.clone(), backend.clone(), bus.clone());
        if let Some(Some(result)) = report("comment", comments.handle(&mut draft, metadata()).await) {
            tracing::info!(comments = result.comment_count, "comment posted");
        }

        // Only the asker may accept
        let accept = AcceptAnswerHandler::new(
            repository.clone(),
            backend.clone(),
            policy.clone(),
            bus.clone(),
        );
        let cmd = AcceptAnswerCommand {
            question_id,
            answer_id: *answer.id(),
        };
        report("accept", accept.handle(cmd, metadata()).await);
    }

    // Follow the question
    let follow = ToggleFollowHandler::new(repository.clone(), backend.clone(), bus.clone());
    if let Some(result) = report(
        "follow",
        follow.handle(ToggleFollowCommand { question_id }, metadata()).await,
    ) {
        tracing::info!(following = result.following, followers = result.follower_count, "follow confirmed");
    }

    // Bookmark it locally
    let bookmarked = ToggleBookmarkHandler::new(repository.clone())
        .handle(ToggleBookmarkCommand { question_id })
        .await?;
    tracing::info!(bookmarked, "bookmark toggled");

    // Withdrawing someone else's accepted answer is refused
    if let Some(accepted) = catalog.threads.iter().find_map(|t| t.accepted_answer()) {
        let withdraw =
            WithdrawAcceptanceHandler::new(repository.clone(), backend.clone(), policy.clone(), bus.clone());
        let cmd = WithdrawAcceptanceCommand {
            question_id: *accepted.question_id(),
            answer_id: *accepted.id(),
        };
        report("withdraw", withdraw.handle(cmd, metadata()).await);
    }

    // Ask a question
    let mut draft = NewQuestionDraft::new();
    draft.set_title("What maintenance schedule works for bioswales in clay soils?");
    draft.set_description("Looking for inspection intervals and sediment removal tips.");
    draft.add_tag("Stormwater");
    draft.add_tag("Green Infrastructure");
    draft.set_privacy(Privacy::Community);
    let ask = AskQuestionHandler::new(repository.clone(), backend.clone(), bus.clone());
    let cmd = AskQuestionCommand {
        author: config.session.author(),
    };
    if let Some(result) = report("ask", ask.handle(&mut draft, cmd, metadata()).await) {
        tracing::info!(question_id = %result.question.id(), "question posted");
    }

    // Start a forum discussion
    let mut post = NewPostDraft::new();
    post.toggle();
    post.set_title("Neighbourhood rain garden workday")?;
    post.set_content("Planning a Saturday planting along the creek. Who has spare sedges?")?;
    let discussions = StartDiscussionHandler::new(bus.clone());
    if let Some(result) = report("discussion", discussions.handle(&mut post, metadata()).await) {
        tracing::info!(discussion_id = %result.discussion_id, "discussion started");
    }

    // Profile
    let mut profile = ProfileEditor::new(ProfileDetails::new(
        config.session.display_name.clone(),
        config.session.title.clone(),
    ));
    profile.begin_edit()?;
    profile.set_location("Portland, OR")?;
    profile.set_specialties(vec!["Greywater".into(), "Rainwater Harvesting".into()])?;
    let saved = profile.save()?;
    tracing::info!(name = %saved.name, specialties = saved.specialties.len(), "profile saved");

    // Knowledge hub
    let articles = BrowseArticlesHandler::new(Arc::new(catalog.articles.clone()));
    for article in articles.handle(&BrowseArticlesQuery {
        category: Some(TopicCategory::Irrigation),
        ..Default::default()
    }) {
        tracing::info!(read_time = %article.read_time_label(), "{}", article.title);
    }

    tracing::info!(events = bus.event_count(), "session finished");
    Ok(())
}
