//! Integration tests for the debate lifecycle.
//!
//! Walks a debate through register → open → participate → close against
//! the in-memory adapters, checking the timer-driven transitions, the
//! vote/comment rules along the way, and the final analysis verdict.

use std::sync::Arc;

use book_agora::adapters::ai::MockAnalysisProvider;
use book_agora::adapters::catalog::MockBookCatalog;
use book_agora::adapters::events::InMemoryEventBus;
use book_agora::adapters::memory::InMemoryStore;
use book_agora::adapters::scheduler::MockTriggerScheduler;
use book_agora::application::handlers::comment::{
    ListCommentsHandler, PostCommentCommand, PostCommentHandler,
};
use book_agora::application::handlers::discussion::{
    CloseDiscussionHandler, GetDiscussionHandler, OpenDiscussionHandler,
    RegisterDiscussionCommand, RegisterDiscussionHandler, DEFAULT_MAX_ANALYSIS_ATTEMPTS,
};
use book_agora::application::handlers::vote::{CastVoteCommand, CastVoteHandler};
use book_agora::application::LifecycleTriggerSink;
use book_agora::domain::discussion::{DebatePolicy, DiscussionStatus};
use book_agora::domain::foundation::{
    CommandMetadata, DiscussionId, ErrorCode, MemberId, ScrollQuery, Timestamp,
};
use book_agora::domain::vote::VoteType;
use book_agora::ports::{DiscussionRepository, TimerKey, TriggerSink};

const ISBN: &str = "9788936434120";

struct Fixture {
    store: Arc<InMemoryStore>,
    publisher: Arc<InMemoryEventBus>,
    sink: LifecycleTriggerSink,
    policy: DebatePolicy,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let publisher = Arc::new(InMemoryEventBus::new());
        let sink = LifecycleTriggerSink::new(
            Arc::new(OpenDiscussionHandler::new(store.clone(), publisher.clone())),
            Arc::new(CloseDiscussionHandler::new(
                store.clone(),
                store.clone(),
                Arc::new(MockAnalysisProvider::new().with_verdict(
                    "The agree side carried the debate.",
                    true,
                    67,
                )),
                publisher.clone(),
                DEFAULT_MAX_ANALYSIS_ATTEMPTS,
            )),
        );
        Self {
            store,
            publisher,
            sink,
            policy: DebatePolicy::default(),
        }
    }

    async fn register(&self, author: MemberId) -> DiscussionId {
        let handler = RegisterDiscussionHandler::new(
            self.store.clone(),
            Arc::new(MockBookCatalog::new().with_book(ISBN, "The Vegetarian")),
            Arc::new(MockTriggerScheduler::new()),
            self.publisher.clone(),
            self.policy,
        );
        let result = handler
            .handle(
                RegisterDiscussionCommand {
                    isbn: ISBN.to_string(),
                    title: "Is the narrator reliable?".to_string(),
                    content: "State your side and defend it.".to_string(),
                    start_date: Timestamp::now().plus_hours(48),
                },
                CommandMetadata::new(author),
            )
            .await
            .expect("registration should succeed");
        result.discussion.id()
    }

    async fn open(&self, id: DiscussionId) {
        self.sink
            .on_fire(TimerKey::OpenDiscussion(id))
            .await
            .expect("open fire should succeed");
    }

    async fn close(&self, id: DiscussionId) {
        self.sink
            .on_fire(TimerKey::CloseDiscussion(id))
            .await
            .expect("close fire should succeed");
    }

    async fn status(&self, id: DiscussionId) -> DiscussionStatus {
        DiscussionRepository::find_by_id(self.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap()
            .status()
    }
}

#[tokio::test]
async fn debate_walks_register_open_participate_close() {
    let fx = Fixture::new();
    let author = MemberId::new(1);
    let id = fx.register(author).await;
    assert_eq!(fx.status(id).await, DiscussionStatus::Waiting);

    fx.open(id).await;
    assert_eq!(fx.status(id).await, DiscussionStatus::Ongoing);

    // Two votes on opposite sides
    let vote = CastVoteHandler::new(fx.store.clone(), fx.store.clone());
    for (member, side) in [(2, VoteType::Agree), (3, VoteType::Agree), (4, VoteType::Disagree)] {
        vote.handle(
            CastVoteCommand {
                discussion_id: id,
                vote_type: side,
            },
            CommandMetadata::new(MemberId::new(member)),
        )
        .await
        .unwrap();
    }

    // One comment per side
    let post = PostCommentHandler::new(fx.store.clone(), fx.store.clone());
    post.handle(
        PostCommentCommand {
            discussion_id: id,
            parent_id: None,
            vote_type: VoteType::Agree,
            content: "Chapter 12 settles it.".to_string(),
        },
        CommandMetadata::new(MemberId::new(2)),
    )
    .await
    .unwrap();

    fx.close(id).await;
    let closed = DiscussionRepository::find_by_id(fx.store.as_ref(), id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status(), DiscussionStatus::Closed);
    assert!(closed.closed_at().is_some());
    let analysis = closed.analysis().expect("verdict should be stored");
    assert_eq!(analysis.verdict, Some(true));

    assert_eq!(fx.publisher.events_of_type("discussion.opened").len(), 1);
    assert_eq!(fx.publisher.events_of_type("discussion.closed").len(), 1);
}

#[tokio::test]
async fn duplicate_timer_fires_are_absorbed() {
    let fx = Fixture::new();
    let id = fx.register(MemberId::new(1)).await;

    fx.open(id).await;
    fx.open(id).await;
    assert_eq!(fx.publisher.events_of_type("discussion.opened").len(), 1);

    fx.close(id).await;
    fx.close(id).await;
    assert_eq!(fx.status(id).await, DiscussionStatus::Closed);
    assert_eq!(fx.publisher.events_of_type("discussion.closed").len(), 1);
}

#[tokio::test]
async fn second_vote_by_same_member_is_rejected_and_not_counted() {
    let fx = Fixture::new();
    let id = fx.register(MemberId::new(1)).await;
    fx.open(id).await;

    let vote = CastVoteHandler::new(fx.store.clone(), fx.store.clone());
    let member = MemberId::new(5);
    vote.handle(
        CastVoteCommand {
            discussion_id: id,
            vote_type: VoteType::Agree,
        },
        CommandMetadata::new(member),
    )
    .await
    .unwrap();

    let err = vote
        .handle(
            CastVoteCommand {
                discussion_id: id,
                vote_type: VoteType::Disagree,
            },
            CommandMetadata::new(member),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateVote);

    let discussion = DiscussionRepository::find_by_id(fx.store.as_ref(), id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(discussion.tally().agree_count(), 1);
    assert_eq!(discussion.tally().disagree_count(), 0);
}

#[tokio::test]
async fn votes_and_comments_require_an_ongoing_debate() {
    let fx = Fixture::new();
    let id = fx.register(MemberId::new(1)).await;

    // Still Waiting: both are rejected
    let vote = CastVoteHandler::new(fx.store.clone(), fx.store.clone());
    let err = vote
        .handle(
            CastVoteCommand {
                discussion_id: id,
                vote_type: VoteType::Agree,
            },
            CommandMetadata::new(MemberId::new(2)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);

    let post = PostCommentHandler::new(fx.store.clone(), fx.store.clone());
    let err = post
        .handle(
            PostCommentCommand {
                discussion_id: id,
                parent_id: None,
                vote_type: VoteType::Agree,
                content: "too early".to_string(),
            },
            CommandMetadata::new(MemberId::new(2)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
}

#[tokio::test]
async fn detail_view_carries_viewer_flags() {
    let fx = Fixture::new();
    let id = fx.register(MemberId::new(1)).await;
    fx.open(id).await;

    let voter = MemberId::new(9);
    CastVoteHandler::new(fx.store.clone(), fx.store.clone())
        .handle(
            CastVoteCommand {
                discussion_id: id,
                vote_type: VoteType::Disagree,
            },
            CommandMetadata::new(voter),
        )
        .await
        .unwrap();

    let get = GetDiscussionHandler::new(fx.store.clone(), fx.store.clone());
    let detail = get.handle(id, Some(voter)).await.unwrap();
    assert_eq!(detail.my_vote, Some(VoteType::Disagree));
    assert!(!detail.already_reported);

    let anonymous = get.handle(id, None).await.unwrap();
    assert_eq!(anonymous.my_vote, None);
}

#[tokio::test]
async fn thread_listing_pages_through_flattened_order() {
    let fx = Fixture::new();
    let id = fx.register(MemberId::new(1)).await;
    fx.open(id).await;

    let post = PostCommentHandler::new(fx.store.clone(), fx.store.clone());
    for i in 0..5 {
        post.handle(
            PostCommentCommand {
                discussion_id: id,
                parent_id: None,
                vote_type: VoteType::Agree,
                content: format!("point {}", i),
            },
            CommandMetadata::new(MemberId::new(10 + i)),
        )
        .await
        .unwrap();
    }

    let list = ListCommentsHandler::new(fx.store.clone(), fx.store.clone());
    let first = list.handle(id, ScrollQuery::from_start(3)).await.unwrap();
    assert_eq!(first.items.len(), 3);
    assert!(first.has_next);

    let rest = list
        .handle(id, ScrollQuery::new(first.last_id, 3))
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 2);
    assert!(!rest.has_next);

    // Positions are a contiguous depth-first numbering
    let positions: Vec<usize> = first
        .items
        .iter()
        .chain(rest.items.iter())
        .map(|e| e.position)
        .collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
}
