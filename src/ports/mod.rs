//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application core and the outside world. Adapters implement them.
//!
//! ## Persistence
//!
//! - `DiscussionRepository` / `DiscussionReader` - debate write/read sides
//! - `CommentRepository` / `CommentReader` - comment write/read sides
//! - `ParticipantRepository` - debate vote ledger
//! - `ReactionRepository` - comment reaction ledger
//! - `ReportRepository` - reports plus the atomic escalation contract
//! - `TargetDirectory` - narrow owner/view-status capability over targets
//!
//! ## External services
//!
//! - `BookCatalog` - ISBN lookup
//! - `AnalysisProvider` - post-debate analysis
//! - `IdentityVerifier` - bearer token verification
//!
//! ## Infrastructure
//!
//! - `TriggerScheduler` / `TriggerSink` - one-shot lifecycle timers
//! - `EventPublisher` - domain event transport

mod analysis_provider;
mod book_catalog;
mod comment_reader;
mod comment_repository;
mod discussion_reader;
mod discussion_repository;
mod event_publisher;
mod identity_verifier;
mod participant_repository;
mod reaction_repository;
mod report_repository;
mod scheduler;
mod target_directory;

pub use analysis_provider::{
    AnalysisComment, AnalysisOutcome, AnalysisProvider, AnalysisRequest,
};
pub use book_catalog::{BookCatalog, CatalogBook};
pub use comment_reader::CommentReader;
pub use comment_repository::CommentRepository;
pub use discussion_reader::{
    DiscussionDetail, DiscussionFilter, DiscussionReader, DiscussionSummary,
};
pub use discussion_repository::DiscussionRepository;
pub use event_publisher::EventPublisher;
pub use identity_verifier::IdentityVerifier;
pub use participant_repository::ParticipantRepository;
pub use reaction_repository::ReactionRepository;
pub use report_repository::ReportRepository;
pub use scheduler::{TimerKey, TriggerScheduler, TriggerSink};
pub use target_directory::TargetDirectory;
