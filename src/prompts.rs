use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::error::Result;
use crate::memes::MemeTemplate;

const LESSON_TEMPLATE: &str = r#"Context: {{ context }}
Explain {{ query }} in {{ subject }} in simple {{ language }}, using Gen Alpha slang (e.g., 'lit', 'bussin'), a clean meme reference (e.g., Drake for approve/reject), and an Indian cultural analogy (e.g., Vedic math for math, Diwali rocket for chemistry, monsoon winds for physics).
Keep it fun, educational, max 200 words. End with a 3-question multiple-choice quiz (include answers).
Example: For math, "Quadratics are like choosing the GOAT ladoo at a Diwali party.""#;

const MEME_CAPTION_TEMPLATE: &str =
    "Based on this lesson about {{ query }} in {{ subject }}, {{ instructions }}";

const STUDY_PLAN_TEMPLATE: &str = r#"You are a helpful curriculum assistant. Given the student's question and a list of syllabus topics, suggest 3 relevant topics and a brief study plan. Use only the provided context.

Question: {{ question }}

Context:
{{ context }}"#;

/// The fixed prompt templates this service renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Lesson,
    MemeCaption,
    StudyPlan,
}

impl PromptKind {
    pub fn name(self) -> &'static str {
        match self {
            PromptKind::Lesson => "lesson",
            PromptKind::MemeCaption => "meme-caption",
            PromptKind::StudyPlan => "study-plan",
        }
    }

    fn source(self) -> &'static str {
        match self {
            PromptKind::Lesson => LESSON_TEMPLATE,
            PromptKind::MemeCaption => MEME_CAPTION_TEMPLATE,
            PromptKind::StudyPlan => STUDY_PLAN_TEMPLATE,
        }
    }
}

/// Renders prompts by placeholder substitution. Unknown placeholders are errors.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for kind in [PromptKind::Lesson, PromptKind::MemeCaption, PromptKind::StudyPlan] {
            env.add_template(kind.name(), kind.source())?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, kind: PromptKind, params: Value) -> Result<String> {
        let template = self.env.get_template(kind.name())?;
        Ok(template.render(params)?)
    }

    pub fn lesson(&self, context: &str, query: &str, subject: &str, language: &str) -> Result<String> {
        self.render(
            PromptKind::Lesson,
            context! { context, query, subject, language },
        )
    }

    /// Caption prompt carrying the selected template's slot instructions verbatim.
    pub fn meme_caption(&self, template: &MemeTemplate, query: &str, subject: &str) -> Result<String> {
        self.render(
            PromptKind::MemeCaption,
            context! { query, subject, instructions => template.instructions },
        )
    }

    pub fn study_plan(&self, question: &str, context: &str) -> Result<String> {
        self.render(PromptKind::StudyPlan, context! { question, context })
    }
}
