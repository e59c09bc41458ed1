//! Adapters - concrete implementations of the ports.
//!
//! - `memory` - single-lock in-memory store backing every repository port (tests, local runs)
//! - `postgres` - PostgreSQL-backed persistence
//! - `http` - axum REST surface
//! - `auth` - JWT identity verification (plus a pattern mock)
//! - `catalog` - external book catalog client
//! - `ai` - OpenAI-compatible analysis provider
//! - `scheduler` - tokio timer scheduler for lifecycle triggers
//! - `events` - in-memory event bus

pub mod ai;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;
