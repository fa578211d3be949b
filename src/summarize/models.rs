// src/summarize/models.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes technical construction descriptions.";

/// Everything the summarization client needs, passed in by the caller.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl SummarizerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Chat completions request body
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequest {
    /// Builds the summarization prompt for one description.
    pub fn summarize(config: &SummarizerConfig, text: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Summarize this for a construction log:\n{}", text),
                },
            ],
            max_tokens: config.max_tokens,
        }
    }
}

/// Chat completions response body, only the fields we read
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if any.
    pub fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
    }
}
