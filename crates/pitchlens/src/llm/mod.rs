//! External LLM completion support behind a narrow provider trait.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Sampling parameters for one completion call.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// One finished completion. `truncated` is set when the provider stopped at
/// the output-token ceiling rather than at a natural end.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub truncated: bool,
}

/// Capability seam around the external completion API.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        config: &GenerationConfig,
    ) -> Result<Completion>;
}

/// OpenAI chat-completions client. The API key comes from the environment at
/// engine construction; a missing key fails at call time, not at startup.
pub struct OpenAiProvider {
    api_key: Option<String>,
    client: Client,
}

impl OpenAiProvider {
    const ENDPOINT: &'static str = "https://api.openai.com/v1/chat/completions";

    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(15))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        Ok(Self { api_key, client })
    }

    /// Read the key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("OPENAI_API_KEY").ok())
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        config: &GenerationConfig,
    ) -> Result<Completion> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set"))?;

        let request = json!({
            "model": config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
        });

        let response = self
            .client
            .post(Self::ENDPOINT)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("Completion request timed out")
                } else {
                    anyhow!("Completion request failed: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(anyhow!("Completion API error ({}): {}", status, error));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse completion response: {}", e))?;

        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Completion API returned empty choices array"))?;

        Ok(Completion {
            text: choice.message.content,
            truncated: choice.finish_reason.as_deref() == Some("length"),
        })
    }
}
