pub mod completion;
pub mod config;
pub mod error;
pub mod handlers;
pub mod imgflip;
pub mod memes;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod syllabus;
pub mod topics;
pub mod transport;

use std::sync::Arc;

use crate::completion::{CompletionClient, GroqCompletion};
use crate::config::Config;
use crate::error::Result;
use crate::imgflip::{ImgflipClient, MemeClient};
use crate::memes::{RandomPicker, TemplatePicker};
use crate::orchestrator::LessonOrchestrator;
use crate::prompts::PromptBuilder;
use crate::syllabus::SyllabusStore;
use crate::topics::TopicAdvisor;
use crate::transport::{GroqTransport, Transport};

/// Everything a request needs, built once at startup and shared read-only.
pub struct AppContext {
    pub config: Arc<Config>,
    pub orchestrator: LessonOrchestrator,
    pub topics: TopicAdvisor,
}

impl AppContext {
    pub fn new(cfg: Arc<Config>) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(GroqTransport::new(
            &cfg.groq.base_url,
            cfg.groq.api_key.clone(),
            cfg.groq_timeout(),
        )?);

        let completion = Arc::new(GroqCompletion::new(
            transport,
            cfg.groq.model.clone(),
            cfg.groq.temperature,
            cfg.groq.max_tokens,
        ));
        let memes = Arc::new(ImgflipClient::new(&cfg.imgflip, cfg.imgflip_timeout())?);
        let syllabus = Arc::new(SyllabusStore::load(&cfg.syllabus));

        Self::with_collaborators(cfg, syllabus, completion, memes, Arc::new(RandomPicker))
    }

    /// Wire the context from explicit collaborators.
    pub fn with_collaborators(
        cfg: Arc<Config>,
        syllabus: Arc<SyllabusStore>,
        completion: Arc<dyn CompletionClient>,
        memes: Arc<dyn MemeClient>,
        picker: Arc<dyn TemplatePicker>,
    ) -> Result<Self> {
        let prompts = Arc::new(PromptBuilder::new()?);

        let orchestrator = LessonOrchestrator::new(
            Arc::clone(&syllabus),
            Arc::clone(&prompts),
            Arc::clone(&completion),
            memes,
            picker,
        );
        let topics = TopicAdvisor::new(syllabus, prompts, completion);

        Ok(Self {
            config: cfg,
            orchestrator,
            topics,
        })
    }
}
