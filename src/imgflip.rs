use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::config::ImgflipConfig;
use crate::error::{Result, VibeCheckError};
use crate::models::{ImgflipResponse, MemeCaption};

pub const MEME_FAILED: &str = "Meme generation failed.";
pub const MEME_UNAVAILABLE: &str = "Meme unavailable, but lesson still slaps!";

/// Result of one caption request. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemeOutcome {
    Url(String),
    /// The provider answered with `success: false`
    Failed,
    /// Transport error or an unusable reply
    Unavailable,
}

impl MemeOutcome {
    pub fn as_text(&self) -> &str {
        match self {
            MemeOutcome::Url(url) => url,
            MemeOutcome::Failed => MEME_FAILED,
            MemeOutcome::Unavailable => MEME_UNAVAILABLE,
        }
    }
}

impl fmt::Display for MemeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemeClient: Send + Sync {
    async fn caption(&self, template_id: &str, caption: &MemeCaption) -> MemeOutcome;
}

pub struct ImgflipClient {
    client: Client,
    caption_url: String,
    username: String,
    password: String,
}

impl ImgflipClient {
    pub fn new(cfg: &ImgflipConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            VibeCheckError::Config(format!("Failed to create Imgflip HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            caption_url: cfg.caption_url.clone(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    async fn request(&self, template_id: &str, caption: &MemeCaption) -> Result<ImgflipResponse> {
        let params = [
            ("template_id", template_id),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("text0", caption.text0.as_str()),
            ("text1", caption.text1.as_str()),
        ];

        let response = self
            .client
            .get(&self.caption_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

impl fmt::Debug for ImgflipClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgflipClient")
            .field("caption_url", &self.caption_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl MemeClient for ImgflipClient {
    async fn caption(&self, template_id: &str, caption: &MemeCaption) -> MemeOutcome {
        match self.request(template_id, caption).await {
            Ok(ImgflipResponse {
                success: true,
                data: Some(data),
                ..
            }) => MemeOutcome::Url(data.url),
            Ok(ImgflipResponse {
                success: true,
                data: None,
                ..
            }) => {
                tracing::warn!("Imgflip reported success without an image url");
                MemeOutcome::Unavailable
            }
            Ok(ImgflipResponse { error_message, .. }) => {
                tracing::warn!(
                    "Imgflip caption failed: {}",
                    error_message.as_deref().unwrap_or("no error message")
                );
                MemeOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Meme error: {}", e);
                MemeOutcome::Unavailable
            }
        }
    }
}
