//! Domain layer - aggregates, value objects and domain events.
//!
//! Pure business logic with no infrastructure dependencies. Each module
//! owns one aggregate and its events; `foundation` carries the shared
//! value objects and event plumbing.

pub mod comment;
pub mod discussion;
pub mod foundation;
pub mod report;
pub mod vote;
