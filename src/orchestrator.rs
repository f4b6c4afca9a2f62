//! Lesson orchestration: context lookup, lesson generation, meme template
//! selection, caption generation, meme fetch and response assembly.
//!
//! Every stage hands back an explicit value. Completion failures end the
//! request in a single degraded state; meme failures only change the trailer.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use uuid::Uuid;

use crate::completion::CompletionClient;
use crate::error::Result;
use crate::imgflip::{MemeClient, MemeOutcome};
use crate::memes::{MemeTemplate, TemplatePicker};
use crate::models::{LessonRequest, LessonResult, MemeCaption};
use crate::prompts::PromptBuilder;
use crate::syllabus::SyllabusStore;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)]+").expect("URL pattern is valid"));

const IMAGE_SUFFIXES: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// How a single lesson request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum VibeCheck {
    Complete {
        lesson: String,
        template: &'static str,
        meme: MemeOutcome,
    },
    /// A completion call failed; only an apology is returned
    Degraded { query: String },
}

impl VibeCheck {
    /// The single string handed to the caller.
    pub fn render(&self) -> String {
        match self {
            VibeCheck::Complete { lesson, meme, .. } => {
                format!("{lesson}\n\n**Meme Quiz Vibes**: Check this out: {meme}")
            }
            VibeCheck::Degraded { query } => degraded_lesson(query),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, VibeCheck::Degraded { .. })
    }
}

pub fn degraded_lesson(query: &str) -> String {
    format!("Oops, something’s not vibin’! Try again with query: {query}")
}

/// First URL in the text, if it looks like an image and is not a failure marker.
pub fn extract_meme_url(text: &str) -> Option<String> {
    let url = URL_PATTERN.find(text)?.as_str();
    let is_image = IMAGE_SUFFIXES.iter().any(|suffix| url.ends_with(suffix));
    (is_image && !url.contains("failed")).then(|| url.to_string())
}

pub struct LessonOrchestrator {
    syllabus: Arc<SyllabusStore>,
    prompts: Arc<PromptBuilder>,
    completion: Arc<dyn CompletionClient>,
    memes: Arc<dyn MemeClient>,
    picker: Arc<dyn TemplatePicker>,
}

impl LessonOrchestrator {
    pub fn new(
        syllabus: Arc<SyllabusStore>,
        prompts: Arc<PromptBuilder>,
        completion: Arc<dyn CompletionClient>,
        memes: Arc<dyn MemeClient>,
        picker: Arc<dyn TemplatePicker>,
    ) -> Self {
        Self {
            syllabus,
            prompts,
            completion,
            memes,
            picker,
        }
    }

    /// Run the pipeline and split out the meme url the way the API reports it.
    pub async fn lesson(&self, req: &LessonRequest) -> LessonResult {
        let lesson = self.vibe_check(req).await.render();
        let meme_url = extract_meme_url(&lesson);
        LessonResult { lesson, meme_url }
    }

    pub async fn vibe_check(&self, req: &LessonRequest) -> VibeCheck {
        let request_id = Uuid::new_v4();

        match self.run(req, request_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(%request_id, "Agent error: {}", e);
                VibeCheck::Degraded {
                    query: req.query.clone(),
                }
            }
        }
    }

    async fn run(&self, req: &LessonRequest, request_id: Uuid) -> Result<VibeCheck> {
        let context = self.syllabus.lookup_context(&req.subject);
        tracing::info!(%request_id, "Context for {}: {}", req.subject, context);

        let lesson = self.generate_lesson(req, &context).await?;
        tracing::debug!(%request_id, "Lesson generated: {}...", preview(&lesson, 50));

        let template = self.picker.pick();
        let caption = self.generate_caption(template, req).await?;

        let meme = self.memes.caption(template.id, &caption).await;
        tracing::info!(
            %request_id,
            template = template.name,
            "Meme URL: {}",
            meme
        );

        Ok(VibeCheck::Complete {
            lesson,
            template: template.name,
            meme,
        })
    }

    async fn generate_lesson(&self, req: &LessonRequest, context: &str) -> Result<String> {
        let prompt = self
            .prompts
            .lesson(context, &req.query, &req.subject, &req.language)?;
        self.completion.complete(&prompt).await
    }

    async fn generate_caption(
        &self,
        template: &MemeTemplate,
        req: &LessonRequest,
    ) -> Result<MemeCaption> {
        let prompt = self.prompts.meme_caption(template, &req.query, &req.subject)?;
        let raw = self.completion.complete(&prompt).await?;
        Ok(MemeCaption::parse(&raw, &req.query, &req.subject))
    }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
