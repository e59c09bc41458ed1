//! Trigger scheduler adapters.

mod mock;
mod tokio_scheduler;

pub use mock::{MockTriggerScheduler, RegisteredTimer};
pub use tokio_scheduler::TokioTriggerScheduler;
