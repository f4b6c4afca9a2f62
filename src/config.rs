use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, VibeCheckError};

/// Main configuration structure for the lesson service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub groq: GroqConfig,
    pub imgflip: ImgflipConfig,
    pub syllabus: SyllabusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// host:port the HTTP API binds to
    pub bind: String,
    /// Directory holding the static frontend, served when present
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgflipConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub caption_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusConfig {
    pub path: String,
    /// Write a starter syllabus when the file is missing
    #[serde(default)]
    pub bootstrap: bool,
    /// How many matching descriptions feed the lesson context
    pub context_rows: usize,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Always returns a config; call [`Config::validate`] before serving.
    pub fn load() -> Self {
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::warn!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("VIBE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = Self::from_file(Path::new(&config_path));
        config.apply_env_overrides();
        config
    }

    /// Read a YAML config file, falling back to defaults when it is absent or broken
    pub fn from_file(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!(
                "Config file not found at {} - using defaults",
                path.display()
            );
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read config file {}: {} - using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(bind) = env::var("VIBE_HTTP_BIND") {
            self.server.bind = bind;
        }
        if let Ok(dir) = env::var("VIBE_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // Groq overrides
        if let Ok(api_key) = env::var("GROQ_API_KEY") {
            self.groq.api_key = api_key;
        }
        if let Ok(base_url) = env::var("GROQ_BASE_URL") {
            self.groq.base_url = base_url;
        }
        if let Ok(model) = env::var("GROQ_MODEL") {
            self.groq.model = model;
        }
        if let Ok(timeout) = env::var("GROQ_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse() {
                self.groq.timeout_seconds = secs;
            }
        }

        // Imgflip overrides
        if let Ok(username) = env::var("IMGFLIP_USERNAME") {
            self.imgflip.username = username;
        }
        if let Ok(password) = env::var("IMGFLIP_PASSWORD") {
            self.imgflip.password = password;
        }
        if let Ok(url) = env::var("IMGFLIP_CAPTION_URL") {
            self.imgflip.caption_url = url;
        }

        // Syllabus overrides
        if let Ok(path) = env::var("VIBE_SYLLABUS_PATH") {
            self.syllabus.path = path;
        }
        if let Ok(flag) = env::var("VIBE_SYLLABUS_BOOTSTRAP") {
            self.syllabus.bootstrap = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Validate configuration. Missing credentials are fatal.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.groq.api_key.trim().is_empty() {
            missing.push("GROQ_API_KEY");
        }
        if self.imgflip.username.trim().is_empty() {
            missing.push("IMGFLIP_USERNAME");
        }
        if self.imgflip.password.trim().is_empty() {
            missing.push("IMGFLIP_PASSWORD");
        }
        if !missing.is_empty() {
            return Err(VibeCheckError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        if self.groq.timeout_seconds == 0 || self.imgflip.timeout_seconds == 0 {
            return Err(VibeCheckError::Config(
                "Provider timeouts must be at least one second".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.groq.temperature) {
            return Err(VibeCheckError::Config(
                "Groq temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.groq.max_tokens <= 0 {
            return Err(VibeCheckError::Config(
                "Groq max_tokens must be positive".to_string(),
            ));
        }
        if self.syllabus.context_rows == 0 {
            return Err(VibeCheckError::Config(
                "syllabus.context_rows cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get Groq request timeout as Duration
    pub fn groq_timeout(&self) -> Duration {
        Duration::from_secs(self.groq.timeout_seconds)
    }

    /// Get Imgflip request timeout as Duration
    pub fn imgflip_timeout(&self) -> Duration {
        Duration::from_secs(self.imgflip.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:5001".to_string(),
                static_dir: "frontend".to_string(),
            },
            groq: GroqConfig {
                api_key: String::new(),
                base_url: "https://api.groq.com/openai/v1".to_string(),
                model: "llama-3.1-8b-instant".to_string(),
                temperature: 0.7,
                max_tokens: 1024,
                timeout_seconds: 30,
            },
            imgflip: ImgflipConfig {
                username: String::new(),
                password: String::new(),
                caption_url: "https://api.imgflip.com/caption_image".to_string(),
                timeout_seconds: 10,
            },
            syllabus: SyllabusConfig {
                path: "data/cbse_stem.csv".to_string(),
                bootstrap: false,
                context_rows: 3,
            },
        }
    }
}
