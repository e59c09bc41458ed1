//! Mock analysis provider for testing.
//!
//! Queue-based: each call consumes the next configured response. An
//! empty queue returns a neutral verdict so simple tests need no setup.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AnalysisOutcome, AnalysisProvider, AnalysisRequest};

enum MockResponse {
    Success(AnalysisOutcome),
    Error(String),
}

/// Configurable mock analysis provider.
pub struct MockAnalysisProvider {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<AnalysisRequest>>,
}

impl MockAnalysisProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful outcome.
    pub fn with_outcome(self, outcome: AnalysisOutcome) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(outcome));
        self
    }

    /// Queues a simple conclusive outcome.
    pub fn with_verdict(self, conclusion: &str, verdict: bool, agree_percent: u8) -> Self {
        self.with_outcome(AnalysisOutcome {
            conclusion: conclusion.to_string(),
            verdict: Some(verdict),
            agree_percent: Some(agree_percent),
        })
    }

    /// Queues an error.
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(message.to_string()));
        self
    }

    /// Requests seen so far.
    pub fn calls(&self) -> Vec<AnalysisRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of analyze calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, DomainError> {
        self.calls.lock().unwrap().push(request.clone());

        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Success(outcome)) => Ok(outcome),
            Some(MockResponse::Error(message)) => {
                Err(DomainError::new(ErrorCode::AnalysisProviderError, message))
            }
            None => Ok(AnalysisOutcome {
                conclusion: "Inconclusive debate".to_string(),
                verdict: None,
                agree_percent: None,
            }),
        }
    }
}
