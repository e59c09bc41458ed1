//! Command infrastructure for the application handlers.
//!
//! Instead of each handler accepting `correlation_id: Option<String>,
//! member_id: MemberId, source: Option<String>` separately, they accept a
//! single `CommandMetadata` struct. This keeps handler signatures stable
//! when new metadata fields are added.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MemberId;

/// Metadata context for command handlers.
///
/// Carries tracing, correlation, and identity context through the command
/// processing pipeline, and is propagated onto emitted events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The member executing this command (required for authorization).
    pub member_id: MemberId,

    /// Links related operations across a single request.
    /// Generated at the API boundary if not provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required member ID.
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Sets the correlation ID.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Sets the command source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the command source, if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_id_is_preserved_when_set() {
        let metadata = CommandMetadata::new(MemberId::new(1)).with_correlation_id("req-42");
        assert_eq!(metadata.correlation_id(), "req-42");
    }

    #[test]
    fn correlation_id_is_generated_when_absent() {
        let metadata = CommandMetadata::new(MemberId::new(1));
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn source_defaults_to_none() {
        let metadata = CommandMetadata::new(MemberId::new(1));
        assert_eq!(metadata.source(), None);
        let metadata = metadata.with_source("scheduler");
        assert_eq!(metadata.source(), Some("scheduler"));
    }
}
