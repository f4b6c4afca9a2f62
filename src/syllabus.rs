use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::config::SyllabusConfig;
use crate::error::{Result, VibeCheckError};
use crate::models::SyllabusRow;

pub const EMPTY_STORE_CONTEXT: &str = "No syllabus context available.";
pub const NO_MATCH_CONTEXT: &str = "No syllabus context.";

/// Read-only syllabus table, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct SyllabusStore {
    rows: Vec<SyllabusRow>,
    context_rows: usize,
}

impl SyllabusStore {
    pub fn new(rows: Vec<SyllabusRow>, context_rows: usize) -> Self {
        Self { rows, context_rows }
    }

    pub fn empty(context_rows: usize) -> Self {
        Self::new(Vec::new(), context_rows)
    }

    /// Load the configured syllabus. Never fails: any problem degrades to an empty store.
    pub fn load(cfg: &SyllabusConfig) -> Self {
        let path = Path::new(&cfg.path);

        if cfg.bootstrap && !path.exists() {
            match Self::bootstrap(path) {
                Ok(()) => tracing::info!("Wrote starter syllabus to {}", path.display()),
                Err(e) => tracing::warn!(
                    "Failed to bootstrap syllabus at {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        match Self::from_path(path, cfg.context_rows) {
            Ok(store) => {
                tracing::info!(
                    "Syllabus loaded from {} with {} rows",
                    path.display(),
                    store.len()
                );
                store
            }
            Err(e) => {
                tracing::warn!(
                    "Syllabus unavailable at {}: {} - continuing without context",
                    path.display(),
                    e
                );
                Self::empty(cfg.context_rows)
            }
        }
    }

    pub fn from_path(path: &Path, context_rows: usize) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(file, context_rows)
    }

    /// Parse CSV with case-insensitive headers. Rows that fail to decode are skipped.
    pub fn from_reader<R: Read>(reader: R, context_rows: usize) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: StringRecord = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        if !headers.iter().any(|h| h == "subject") {
            return Err(VibeCheckError::Syllabus(
                "missing required 'subject' column".to_string(),
            ));
        }
        rdr.set_headers(headers);

        let mut rows = Vec::new();
        for (line, record) in rdr.deserialize::<SyllabusRow>().enumerate() {
            match record {
                Ok(row) if !row.subject.is_empty() => rows.push(row),
                Ok(_) => tracing::debug!("Skipping syllabus row {} without subject", line + 1),
                Err(e) => tracing::warn!("Skipping malformed syllabus row {}: {}", line + 1, e),
            }
        }

        Ok(Self::new(rows, context_rows))
    }

    /// Write a minimal starter syllabus so a fresh checkout can answer immediately.
    pub fn bootstrap(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = WriterBuilder::new().from_path(path)?;
        for row in starter_rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Context for a subject: the first few matching descriptions joined with ", ".
    pub fn lookup_context(&self, subject: &str) -> String {
        if self.rows.is_empty() {
            return EMPTY_STORE_CONTEXT.to_string();
        }

        let context: Vec<String> = self
            .rows
            .iter()
            .filter(|row| subject_matches(&row.subject, subject))
            .filter_map(SyllabusRow::context_text)
            .take(self.context_rows)
            .collect();

        if context.is_empty() {
            NO_MATCH_CONTEXT.to_string()
        } else {
            context.join(", ")
        }
    }

    /// Rows for an optional subject and grade.
    pub fn filter_topics(&self, subject: Option<&str>, grade: Option<u32>) -> Vec<&SyllabusRow> {
        self.rows
            .iter()
            .filter(|row| subject.is_none_or(|s| subject_matches(&row.subject, s)))
            .filter(|row| grade.is_none_or(|g| row.grade == Some(g)))
            .collect()
    }

    /// Filtered rows whose topic or keywords contain any word of the question.
    pub fn search_topics(
        &self,
        question: &str,
        subject: Option<&str>,
        grade: Option<u32>,
    ) -> Vec<SyllabusRow> {
        let lower = question.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        self.filter_topics(subject, grade)
            .into_iter()
            .filter(|row| {
                let haystack = format!(
                    "{} {}",
                    row.topic.as_deref().unwrap_or_default(),
                    row.keywords.as_deref().unwrap_or_default()
                )
                .to_lowercase();
                tokens.iter().any(|token| haystack.contains(token))
            })
            .cloned()
            .collect()
    }
}

fn subject_matches(row_subject: &str, wanted: &str) -> bool {
    row_subject.trim().eq_ignore_ascii_case(wanted.trim())
}

fn starter_rows() -> Vec<SyllabusRow> {
    let row = |subject: &str, topic: &str, keywords: &str, description: &str| SyllabusRow {
        subject: subject.to_string(),
        grade: Some(8),
        topic: Some(topic.to_string()),
        keywords: Some(keywords.to_string()),
        description: Some(description.to_string()),
    };
    vec![
        row(
            "Math",
            "Algebra Basics",
            "variables, expressions",
            "Variables and algebraic expressions",
        ),
        row(
            "Math",
            "Linear Equations",
            "slope, intercept",
            "Linear equations in one variable",
        ),
        row(
            "Science",
            "Atoms and Molecules",
            "proton, neutron, electron",
            "Structure of atoms and molecules",
        ),
        row(
            "Science",
            "Force and Motion",
            "force, inertia, acceleration",
            "Newton's laws of motion",
        ),
    ]
}
