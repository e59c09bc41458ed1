//! In-memory adapters.
//!
//! `InMemoryStore` implements every persistence port over one shared
//! lock, giving the same atomicity the postgres adapter gets from
//! transactions. Tests and database-less development use it as a drop-in
//! backend.

mod comment;
mod discussion;
mod report;
mod store;
mod vote;

pub use store::InMemoryStore;
