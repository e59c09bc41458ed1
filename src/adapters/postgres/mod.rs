//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresDiscussionRepository` / `PostgresDiscussionReader` - debate aggregate and list/detail queries
//! - `PostgresCommentRepository` / `PostgresCommentReader` - comment rows for the thread engine
//! - `PostgresParticipantRepository` / `PostgresReactionRepository` - one-row-per-member ledgers
//! - `PostgresReportRepository` - reports plus the transactional escalation decisions
//! - `PostgresTargetDirectory` - owner/view-status dispatch over reportable content

mod comment_repository;
mod discussion_reader;
mod discussion_repository;
mod participant_repository;
mod reaction_repository;
mod report_repository;
mod target_directory;

pub use comment_repository::{PostgresCommentReader, PostgresCommentRepository};
pub use discussion_reader::PostgresDiscussionReader;
pub use discussion_repository::PostgresDiscussionRepository;
pub use participant_repository::PostgresParticipantRepository;
pub use reaction_repository::PostgresReactionRepository;
pub use report_repository::PostgresReportRepository;
pub use target_directory::PostgresTargetDirectory;
