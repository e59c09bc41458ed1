//! Visibility flag shared by discussions and comments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation visibility flag, orthogonal to any lifecycle status.
///
/// Blocked content is never hard-deleted; it is hidden from readers and
/// excluded from analysis input and selected-comment computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewStatus {
    Normal,
    Blocked,
}

impl ViewStatus {
    /// Returns true if the content is visible to readers.
    pub fn is_visible(&self) -> bool {
        matches!(self, ViewStatus::Normal)
    }
}

impl fmt::Display for ViewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewStatus::Normal => "NORMAL",
            ViewStatus::Blocked => "BLOCKED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_visible_and_blocked_is_not() {
        assert!(ViewStatus::Normal.is_visible());
        assert!(!ViewStatus::Blocked.is_visible());
    }

    #[test]
    fn view_status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ViewStatus::Blocked).unwrap(),
            "\"BLOCKED\""
        );
    }
}
