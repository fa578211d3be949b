// src/summarize/client.rs
use crate::summarize::models::{ChatRequest, ChatResponse, SummarizerConfig};
use crate::summarize::Summarizer;
use crate::utils::error::SummarizeError;
use std::time::Duration;

/// Summarizes descriptions through an OpenAI-compatible chat completions endpoint.
pub struct ChatSummarizer {
    client: reqwest::Client,
    config: SummarizerConfig,
}

impl ChatSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizeError> {
        if config.api_key.trim().is_empty() {
            return Err(SummarizeError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

impl Summarizer for ChatSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let request = ChatRequest::summarize(&self.config, text);
        tracing::debug!("Requesting summary from {} ({} chars)", self.config.endpoint, text.len());

        let response = self.client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?; // Propagates reqwest::Error as SummarizeError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} from {}", status, self.config.endpoint);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(SummarizeError::Unauthorized);
            }
            return Err(SummarizeError::Http(status));
        }

        let body: ChatResponse = response.json().await?;
        body.first_content().ok_or(SummarizeError::EmptyResponse)
    }
}
