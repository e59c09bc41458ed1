//! Analysis provider port.
//!
//! When a debate closes, the full thread is handed to an external
//! analysis service that produces a conclusion, an overall verdict and
//! an agree percentage. Failures leave the discussion in Analyzing for
//! a later retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::discussion::AnalysisVerdict;
use crate::domain::foundation::{DiscussionId, DomainError, Percentage};
use crate::domain::vote::VoteType;

/// One comment as presented to the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisComment {
    /// Side the commenter took.
    pub vote_type: VoteType,
    pub content: String,
    pub like_count: u32,
}

/// Everything the analysis service sees about a finished debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub discussion_id: DiscussionId,
    pub title: String,
    pub content: String,
    pub book_title: String,
    pub agree_count: u32,
    pub disagree_count: u32,
    pub comments: Vec<AnalysisComment>,
}

/// Raw outcome returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub conclusion: String,
    /// Overall outcome; None when the debate was inconclusive.
    pub verdict: Option<bool>,
    /// Agree share 0..=100; None when undetermined.
    pub agree_percent: Option<u8>,
}

impl AnalysisOutcome {
    /// Converts the raw outcome into the domain verdict, clamping the
    /// percentage into range.
    pub fn into_verdict(self) -> AnalysisVerdict {
        AnalysisVerdict {
            conclusion: self.conclusion,
            verdict: self.verdict,
            agree_percent: self.agree_percent.map(Percentage::new),
        }
    }
}

/// Port for the external debate-analysis service.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyze a finished debate.
    ///
    /// # Errors
    ///
    /// - `AnalysisProviderError` on transport or parse failure
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, DomainError>;
}
