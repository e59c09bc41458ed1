//! Debate scheduling configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::discussion::DebatePolicy;

/// Debate scheduling configuration
///
/// Controls how far in advance a debate may be scheduled, how long it
/// stays open, and how many analysis attempts are made before giving up.
#[derive(Debug, Clone, Deserialize)]
pub struct DebateConfig {
    /// Minimum lead time between registration and start, in hours
    #[serde(default = "default_min_lead_hours")]
    pub min_lead_hours: i64,

    /// Maximum lead time between registration and start, in hours
    #[serde(default = "default_max_lead_hours")]
    pub max_lead_hours: i64,

    /// Duration of the debate window, in hours
    #[serde(default = "default_debate_window_hours")]
    pub debate_window_hours: i64,

    /// Analysis attempts before a debate is left for manual closure
    #[serde(default = "default_max_analysis_attempts")]
    pub max_analysis_attempts: u32,
}

impl DebateConfig {
    /// Build the domain policy from the configured bounds
    pub fn to_policy(&self) -> DebatePolicy {
        DebatePolicy::new(
            self.min_lead_hours,
            self.max_lead_hours,
            self.debate_window_hours,
        )
    }

    /// Validate debate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_lead_hours <= 0 || self.min_lead_hours > self.max_lead_hours {
            return Err(ValidationError::InvalidLeadWindow);
        }
        if self.debate_window_hours < 1 {
            return Err(ValidationError::InvalidDebateWindow);
        }
        if self.max_analysis_attempts == 0 {
            return Err(ValidationError::InvalidAnalysisAttempts);
        }
        Ok(())
    }
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            min_lead_hours: default_min_lead_hours(),
            max_lead_hours: default_max_lead_hours(),
            debate_window_hours: default_debate_window_hours(),
            max_analysis_attempts: default_max_analysis_attempts(),
        }
    }
}

fn default_min_lead_hours() -> i64 {
    24
}

fn default_max_lead_hours() -> i64 {
    168
}

fn default_debate_window_hours() -> i64 {
    24
}

fn default_max_analysis_attempts() -> u32 {
    3
}
