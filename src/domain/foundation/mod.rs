//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Book Agora domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod page;
mod percentage;
mod state_machine;
mod timestamp;
mod view_status;

pub use auth::{AuthError, AuthenticatedMember, MemberRole};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CommentId, DiscussionId, MemberId, ReportId, TimerId};
pub use page::{CursorPage, ScrollQuery};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use view_status::ViewStatus;
