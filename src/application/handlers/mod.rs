//! Command and query handlers, one module per bounded context.

pub mod comment;
pub mod discussion;
pub mod report;
pub mod vote;
