//! Vote tally with derived percentages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

/// Side taken when voting on a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteType {
    Agree,
    Disagree,
}

impl VoteType {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Agree => "AGREE",
            VoteType::Disagree => "DISAGREE",
        }
    }
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AGREE" => Ok(VoteType::Agree),
            "DISAGREE" => Ok(VoteType::Disagree),
            other => Err(format!("Unknown vote type: {}", other)),
        }
    }
}

/// Running vote counters with percentages derived on read.
///
/// Only the raw counts are stored; percentages are computed as
/// `round(agree / total * 100)` with the disagree share defined as the
/// complement, so the two always sum to exactly 100. A tally with no
/// votes has no percentages at all, so an unvoted debate is
/// distinguishable from a genuine 0% outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    agree_count: u32,
    disagree_count: u32,
}

impl VoteTally {
    pub fn new(agree_count: u32, disagree_count: u32) -> Self {
        Self {
            agree_count,
            disagree_count,
        }
    }

    /// A tally with no votes.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn agree_count(&self) -> u32 {
        self.agree_count
    }

    pub fn disagree_count(&self) -> u32 {
        self.disagree_count
    }

    pub fn total(&self) -> u32 {
        self.agree_count + self.disagree_count
    }

    /// Agree share, rounded half-up. `None` when no votes were cast.
    pub fn agree_percent(&self) -> Option<Percentage> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let ratio = f64::from(self.agree_count) / f64::from(total);
        Some(Percentage::new((ratio * 100.0).round() as u8))
    }

    /// Disagree share as the complement of the agree share; `None` when
    /// no votes were cast.
    pub fn disagree_percent(&self) -> Option<Percentage> {
        self.agree_percent().map(|p| p.complement())
    }
}

impl Default for VoteTally {
    fn default() -> Self {
        Self::empty()
    }
}
