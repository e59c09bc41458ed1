//! Book Agora - time-boxed book debates with community voting and
//! threshold-escalating moderation.
//!
//! Layout follows hexagonal architecture: `domain` holds the aggregates
//! and invariants, `ports` the trait seams, `application` the command
//! and query handlers, and `adapters` the concrete edges (PostgreSQL,
//! axum, JWT, catalog/analysis clients, schedulers).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
