//! Abstract summarization via an OpenAI-compatible chat endpoint.
//!
//! Summarization is best-effort: a paper with no summary is still worth
//! storing, so every failure path collapses to `None` after logging.
//! Each abstract gets exactly one attempt, no retry.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SummarizerConfig;

const SYSTEM_PROMPT: &str = "Summarize this research paper abstract in 2-3 sentences.";

#[async_trait]
pub trait Summarize: Send + Sync {
    /// Returns a short plain-language summary, or `None` if the service
    /// failed in any way.
    async fn summarize(&self, abstract_text: &str) -> Option<String>;
}

#[derive(Error, Debug)]
enum SummarizeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(StatusCode),

    #[error("response contained no generated text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

pub struct OpenRouterSummarizer {
    http: reqwest::Client,
    config: SummarizerConfig,
}

impl OpenRouterSummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn request(&self, abstract_text: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: abstract_text.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Status(status));
        }

        let body: ChatResponse = response.json().await?;
        body.into_text().ok_or(SummarizeError::EmptyResponse)
    }
}

#[async_trait]
impl Summarize for OpenRouterSummarizer {
    async fn summarize(&self, abstract_text: &str) -> Option<String> {
        match self.request(abstract_text).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(model = %self.config.model, error = %e, "Summarization failed");
                None
            }
        }
    }
}
