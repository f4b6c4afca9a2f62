use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::error::{Result, VibeCheckError};
use crate::models::{ChatMessage, GroqRequest};
use crate::transport::Transport;

/// Turns a rendered prompt into generated text.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub struct GroqCompletion {
    tx: Arc<dyn Transport>,
    model: String,
    temperature: f32,
    max_tokens: i32,
}

impl GroqCompletion {
    pub fn new(tx: Arc<dyn Transport>, model: String, temperature: f32, max_tokens: i32) -> Self {
        Self {
            tx,
            model,
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, "Requesting completion ({} prompt chars)", prompt.len());

        let request = GroqRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let groq_response = self.tx.chat(&request).await?;

        if let Some(choice) = groq_response.choices.into_iter().next() {
            Ok(choice.message.content)
        } else {
            Err(VibeCheckError::Provider(
                "Groq API returned empty choices".to_string(),
            ))
        }
    }
}
