//! OpenAI-compatible analysis provider.
//!
//! Sends the finished debate to a chat-completions endpoint and expects
//! a strict JSON object back:
//!
//! ```json
//! { "conclusion": "...", "verdict": true, "agree_percent": 64 }
//! ```
//!
//! `verdict` and `agree_percent` may be null for inconclusive debates.
//! Transport or parse failures surface as `AnalysisProviderError`; the
//! caller leaves the discussion in Analyzing and retries later.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AnalysisOutcome, AnalysisProvider, AnalysisRequest};

const SYSTEM_PROMPT: &str = "You are a debate adjudicator. Given a book debate \
(opening statement, vote counts, and comments labeled AGREE or DISAGREE), decide \
which side argued better. Respond with a single JSON object: {\"conclusion\": \
string, \"verdict\": boolean or null, \"agree_percent\": integer 0-100 or null}. \
Use null verdict when the debate is inconclusive. No other text.";

/// Configuration for the analysis provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Analysis provider speaking the OpenAI chat-completions protocol.
pub struct OpenAiAnalysisProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiAnalysisProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn render_prompt(request: &AnalysisRequest) -> String {
        let mut prompt = format!(
            "Book: {}\nDebate title: {}\nOpening statement: {}\nVotes: {} agree, {} disagree\n\nComments:\n",
            request.book_title,
            request.title,
            request.content,
            request.agree_count,
            request.disagree_count,
        );
        for comment in &request.comments {
            prompt.push_str(&format!(
                "[{} | {} likes] {}\n",
                comment.vote_type, comment.like_count, comment.content
            ));
        }
        prompt
    }

    fn provider_error(message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::AnalysisProviderError, message)
    }
}

#[async_trait]
impl AnalysisProvider for OpenAiAnalysisProvider {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, DomainError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::render_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        tracing::debug!(discussion_id = %request.discussion_id, "requesting debate analysis");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(format!(
                "Analysis API returned {}: {}",
                status, text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Malformed API response: {}", e)))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| Self::provider_error("Analysis API returned no choices"))?;

        let verdict: VerdictJson = serde_json::from_str(content)
            .map_err(|e| Self::provider_error(format!("Malformed verdict JSON: {}", e)))?;

        if verdict.conclusion.trim().is_empty() {
            return Err(Self::provider_error("Verdict conclusion is empty"));
        }
        if let Some(percent) = verdict.agree_percent {
            if percent > 100 {
                return Err(Self::provider_error(format!(
                    "agree_percent out of range: {}",
                    percent
                )));
            }
        }

        Ok(AnalysisOutcome {
            conclusion: verdict.conclusion,
            verdict: verdict.verdict,
            agree_percent: verdict.agree_percent.map(|p| p as u8),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(rename = "response_format")]
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct VerdictJson {
    conclusion: String,
    verdict: Option<bool>,
    agree_percent: Option<u32>,
}
