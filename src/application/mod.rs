//! Application layer: command/query handlers and trigger dispatch.

pub mod handlers;
pub mod trigger;

pub use trigger::LifecycleTriggerSink;
