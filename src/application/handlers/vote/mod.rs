//! Vote and reaction ledger handlers.

mod cast_reaction;
mod cast_vote;

pub use cast_reaction::{CastReactionCommand, CastReactionHandler};
pub use cast_vote::{CastVoteCommand, CastVoteHandler};
