use std::sync::Arc;

use serde::Serialize;

use crate::completion::CompletionClient;
use crate::error::Result;
use crate::prompts::PromptBuilder;
use crate::syllabus::SyllabusStore;

const MAX_CONTEXT_TOPICS: usize = 10;
pub const NO_TOPICS: &str = "No matching topics found.";
pub const STUDY_PLAN_FALLBACK: &str =
    "Study plan unavailable right now, but the topics above are a solid start!";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopicMatch {
    pub subject: String,
    pub grade: String,
    pub topic: String,
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopicAnswer {
    pub matches: Vec<TopicMatch>,
    pub answer: String,
}

/// Suggests syllabus topics and a short study plan for a free-form question.
pub struct TopicAdvisor {
    syllabus: Arc<SyllabusStore>,
    prompts: Arc<PromptBuilder>,
    completion: Arc<dyn CompletionClient>,
}

impl TopicAdvisor {
    pub fn new(
        syllabus: Arc<SyllabusStore>,
        prompts: Arc<PromptBuilder>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            syllabus,
            prompts,
            completion,
        }
    }

    pub async fn advise(
        &self,
        question: &str,
        subject: Option<&str>,
        grade: Option<u32>,
    ) -> TopicAnswer {
        let matches: Vec<TopicMatch> = self
            .syllabus
            .search_topics(question, subject, grade)
            .into_iter()
            .map(|row| TopicMatch {
                subject: row.subject,
                grade: row.grade.map(|g| g.to_string()).unwrap_or_default(),
                topic: row.topic.unwrap_or_default(),
                keywords: row.keywords.unwrap_or_default(),
            })
            .collect();
        tracing::info!("Found {} syllabus topics for question", matches.len());

        let answer = match self.study_plan(question, &matches).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Study plan generation failed: {}", e);
                STUDY_PLAN_FALLBACK.to_string()
            }
        };

        TopicAnswer { matches, answer }
    }

    async fn study_plan(&self, question: &str, matches: &[TopicMatch]) -> Result<String> {
        let prompt = self.prompts.study_plan(question, &topic_context(matches))?;
        self.completion.complete(&prompt).await
    }
}

fn topic_context(matches: &[TopicMatch]) -> String {
    if matches.is_empty() {
        return NO_TOPICS.to_string();
    }
    matches
        .iter()
        .take(MAX_CONTEXT_TOPICS)
        .map(|m| format!("- {} G{}: {} ({})", m.subject, m.grade, m.topic, m.keywords))
        .collect::<Vec<_>>()
        .join("\n")
}
