use log::debug;
use thiserror::Error;

use crate::config::Config;

const SYSTEM_PROMPT: &str = "You are a helpful assistant who summarizes YouTube video transcripts.";

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Fallback output cap for the Anthropic API, which requires max_tokens
const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat-completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected chat-completion response format")]
    MalformedResponse,
}

/// Submits transcripts to a chat-completion endpoint. The provider is
/// picked from the model name; the credential comes from the environment
/// at construction time.
pub struct Summarizer {
    client: reqwest::Client,
    model: String,
    api_key: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl Summarizer {
    pub fn from_env(client: reqwest::Client, config: &Config) -> eyre::Result<Self> {
        let var = if is_anthropic_model(&config.model) {
            "ANTHROPIC_API_KEY"
        } else {
            "OPENAI_API_KEY"
        };

        let api_key = std::env::var(var).map_err(|_| {
            eyre::eyre!(
                "{var} environment variable not set (required for summarization with {})",
                config.model
            )
        })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Summarize a transcript, returning the generated text with
    /// surrounding whitespace trimmed.
    pub async fn summarize(&self, title: &str, transcript_text: &str) -> Result<String, SummarizeError> {
        let summary = if is_anthropic_model(&self.model) {
            self.complete_anthropic(title, transcript_text).await?
        } else {
            self.complete_openai(title, transcript_text).await?
        };

        Ok(summary.trim().to_string())
    }

    async fn complete_openai(&self, title: &str, transcript_text: &str) -> Result<String, SummarizeError> {
        debug!("Summarizing via OpenAI API with model {}", self.model);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_message(title, transcript_text)
                }
            ]
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        let resp = self
            .client
            .post(OPENAI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        let json: serde_json::Value = resp.json().await?;
        extract_openai_text(&json)
    }

    async fn complete_anthropic(&self, title: &str, transcript_text: &str) -> Result<String, SummarizeError> {
        debug!("Summarizing via Anthropic API with model {}", self.model);

        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens.unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS),
            "system": SYSTEM_PROMPT,
            "messages": [
                {
                    "role": "user",
                    "content": user_message(title, transcript_text)
                }
            ]
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        let resp = self
            .client
            .post(ANTHROPIC_ENDPOINT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, body });
        }

        let json: serde_json::Value = resp.json().await?;
        extract_anthropic_text(&json)
    }
}

fn is_anthropic_model(model: &str) -> bool {
    model.starts_with("claude")
}

fn user_message(title: &str, transcript_text: &str) -> String {
    format!("Summarize this transcript from the video \"{title}\":\n\n{transcript_text}")
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String, SummarizeError> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    Err(SummarizeError::MalformedResponse)
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String, SummarizeError> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Err(SummarizeError::MalformedResponse)
}
