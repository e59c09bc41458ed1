//! Debate timing policy.

use serde::{Deserialize, Serialize};

/// Timing rules for debate registration and duration.
///
/// Constructed from configuration and passed into the aggregate so the
/// domain layer stays free of config dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebatePolicy {
    /// Minimum lead time between registration and start, in hours.
    pub min_lead_hours: i64,
    /// Maximum lead time between registration and start, in hours.
    pub max_lead_hours: i64,
    /// Fixed debate duration from open to close, in hours.
    pub debate_window_hours: i64,
}

impl DebatePolicy {
    /// Creates a policy with explicit bounds.
    pub fn new(min_lead_hours: i64, max_lead_hours: i64, debate_window_hours: i64) -> Self {
        Self {
            min_lead_hours,
            max_lead_hours,
            debate_window_hours,
        }
    }
}

impl Default for DebatePolicy {
    /// Start between 24 hours and 7 days out; debates run for 24 hours.
    fn default() -> Self {
        Self {
            min_lead_hours: 24,
            max_lead_hours: 24 * 7,
            debate_window_hours: 24,
        }
    }
}
