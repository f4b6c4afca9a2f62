use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Result, VibeCheckError};
use crate::models::{GroqRequest, GroqResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse>;
}

/// OpenAI-compatible chat-completions transport. One attempt per call.
pub struct GroqTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GroqTransport {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            VibeCheckError::Config(format!("Failed to create Groq HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }
}

impl std::fmt::Debug for GroqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl Transport for GroqTransport {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VibeCheckError::Provider(format!(
                "Groq API returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            VibeCheckError::Provider(format!("Failed to parse Groq API response: {e}"))
        })
    }
}
