use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SUBJECT: &str = "Math";
pub const DEFAULT_LANGUAGE: &str = "English";

/// Lenient grade decoder: ints and whole floats are kept, anything else becomes `None`
/// so the rest of the row survives.
fn deserialize_flexible_grade<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleGrade {
        Int(u32),
        Float(f64),
        String(String),
        Other(serde::de::IgnoredAny),
    }

    let grade = match Option::<FlexibleGrade>::deserialize(deserializer)? {
        Some(FlexibleGrade::Int(i)) => Some(i),
        Some(FlexibleGrade::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Some(f as u32)
        }
        Some(FlexibleGrade::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(grade)
}

/// One syllabus entry. Only `subject` is required in the backing file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SyllabusRow {
    pub subject: String,
    #[serde(default, deserialize_with = "deserialize_flexible_grade")]
    pub grade: Option<u32>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SyllabusRow {
    /// Text used as lesson context: the description, or the topic and its keywords.
    pub fn context_text(&self) -> Option<String> {
        if let Some(desc) = self.description.as_deref().map(str::trim)
            && !desc.is_empty()
        {
            return Some(desc.to_string());
        }
        let topic = self.topic.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        match self.keywords.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            Some(keywords) => Some(format!("{topic} ({keywords})")),
            None => Some(topic.to_string()),
        }
    }
}

/// A single lesson invocation, defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonRequest {
    pub query: String,
    pub subject: String,
    pub language: String,
}

impl LessonRequest {
    pub fn new(query: impl Into<String>, subject: Option<String>, language: Option<String>) -> Self {
        Self {
            query: query.into(),
            subject: subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LessonResult {
    pub lesson: String,
    pub meme_url: Option<String>,
}

/// Two caption slots for a meme template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeCaption {
    pub text0: String,
    pub text1: String,
}

impl MemeCaption {
    /// Split on the first `|`; without one, fall back to synthesized captions.
    pub fn parse(raw: &str, query: &str, subject: &str) -> Self {
        match raw.split_once('|') {
            Some((first, second)) => Self {
                text0: first.trim().to_string(),
                text1: second.trim().to_string(),
            },
            None => Self::synthesized(query, subject),
        }
    }

    pub fn synthesized(query: &str, subject: &str) -> Self {
        Self {
            text0: format!("Confused about {query}"),
            text1: format!("Understanding {subject} vibes"),
        }
    }
}

// Chat message format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Chat-completions request format
#[derive(Debug, Serialize, Clone)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: i32,
}

// Chat-completions response format
#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

// Imgflip caption_image envelope
#[derive(Debug, Deserialize)]
pub struct ImgflipResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ImgflipData>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImgflipData {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_splits_on_first_pipe_and_trims() {
        let caption = MemeCaption::parse("Not understanding X|Getting the Y vibes", "X", "Y");
        assert_eq!(caption.text0, "Not understanding X");
        assert_eq!(caption.text1, "Getting the Y vibes");

        let caption = MemeCaption::parse("  'Do homework' | 'Take a nap | or two' \n", "q", "s");
        assert_eq!(caption.text0, "'Do homework'");
        assert_eq!(caption.text1, "'Take a nap | or two'");
    }

    #[test]
    fn test_caption_without_pipe_is_synthesized() {
        let caption = MemeCaption::parse("no delimiter here", "polynomials", "Math");
        assert_eq!(caption.text0, "Confused about polynomials");
        assert_eq!(caption.text1, "Understanding Math vibes");
    }

    #[test]
    fn test_lesson_request_defaults() {
        let req = LessonRequest::new("atoms", None, None);
        assert_eq!(req.subject, "Math");
        assert_eq!(req.language, "English");

        let req = LessonRequest::new("atoms", Some("Science".into()), Some("Hindi".into()));
        assert_eq!(req.subject, "Science");
        assert_eq!(req.language, "Hindi");
    }

    #[test]
    fn test_context_text_prefers_description() {
        let row = SyllabusRow {
            subject: "Math".into(),
            topic: Some("Algebra Basics".into()),
            keywords: Some("variables, expressions".into()),
            description: Some("Polynomials and factorisation".into()),
            ..Default::default()
        };
        assert_eq!(row.context_text().as_deref(), Some("Polynomials and factorisation"));

        let row = SyllabusRow {
            description: Some("   ".into()),
            ..row
        };
        assert_eq!(
            row.context_text().as_deref(),
            Some("Algebra Basics (variables, expressions)")
        );

        let bare = SyllabusRow {
            subject: "Math".into(),
            ..Default::default()
        };
        assert_eq!(bare.context_text(), None);
    }

    #[test]
    fn test_grade_accepts_numbers_and_drops_the_rest() {
        let grade = |json: &str| serde_json::from_str::<SyllabusRow>(json).unwrap().grade;
        assert_eq!(grade(r#"{"subject":"Math","grade":9}"#), Some(9));
        assert_eq!(grade(r#"{"subject":"Math","grade":9.0}"#), Some(9));
        assert_eq!(grade(r#"{"subject":"Math","grade":" 10 "}"#), Some(10));
        assert_eq!(grade(r#"{"subject":"Math","grade":8.5}"#), None);
        assert_eq!(grade(r#"{"subject":"Math","grade":"Class 8"}"#), None);
        assert_eq!(grade(r#"{"subject":"Math","grade":null}"#), None);
        assert_eq!(grade(r#"{"subject":"Math"}"#), None);
    }
}
