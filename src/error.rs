use thiserror::Error;

#[derive(Error, Debug)]
pub enum VibeCheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Prompt template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Syllabus error: {0}")]
    Syllabus(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, VibeCheckError>;
