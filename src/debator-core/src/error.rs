//! Error types for the practice tool.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebatorError {
    #[error("Unknown topic: '{0}'")]
    UnknownTopic(String),

    #[error("Invalid difficulty: expected 1-5, got {0}")]
    InvalidDifficulty(String),

    #[error("Invalid time limit: expected 60, 90 or 120 seconds, got {0}")]
    InvalidTimeLimit(String),

    #[error("Please provide an answer.")]
    EmptySubmission,

    #[error("The answer field is locked while the timer is not running")]
    EditLocked,

    #[error("'{0}' is not available right now")]
    Unavailable(&'static str),

    #[error("No prompt yet. Use 'new' to generate one.")]
    NoActivePrompt,

    #[error("Cross-examination is already complete")]
    CrossExFinished,

    #[error("Cross-examination is not complete: {answered}/5 questions answered")]
    CrossExInProgress { answered: usize },

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Malformed feedback payload: {0}")]
    MalformedFeedback(String),

    #[error("OpenAI API error: {0}")]
    OpenAIError(#[from] async_openai::error::OpenAIError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
