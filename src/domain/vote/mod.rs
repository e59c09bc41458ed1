//! Vote domain module.
//!
//! Covers both debate-level votes (agree/disagree, one per member per
//! discussion) and comment-level reactions (like/dislike, one per member
//! per comment). Both are append-only ledgers; the aggregates carry the
//! derived counters.

mod errors;
mod participant;
mod reaction;
mod tally;

pub use errors::VoteError;
pub use participant::Participant;
pub use reaction::{Reaction, ReactionKind};
pub use tally::{VoteTally, VoteType};
