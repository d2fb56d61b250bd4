//! Configuration module for loading TOML config files.
//!
//! Every section is optional; anything missing falls back to the built-in
//! defaults, so an empty file is a valid configuration.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::DebatorError;
use crate::settings::{Difficulty, PracticeSettings, TimeLimit};
use crate::question_bank::Topic;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feedback: FeedbackConfig,
    pub practice: PracticeConfig,
    pub prompts: PromptsConfig,
}

/// Connection settings for the grading model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub model: String,
    pub api_base: String,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: 0.3,
            request_timeout_secs: 120,
            connect_timeout_secs: 30,
        }
    }
}

/// Initial sidebar values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub time_limit: TimeLimit,
    pub auto_start: bool,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        let settings = PracticeSettings::default();
        Self {
            topic: settings.topic,
            difficulty: settings.difficulty,
            time_limit: settings.time_limit,
            auto_start: settings.auto_start,
        }
    }
}

impl From<&PracticeConfig> for PracticeSettings {
    fn from(config: &PracticeConfig) -> Self {
        PracticeSettings::new(config.topic)
            .with_difficulty(config.difficulty)
            .with_time_limit(config.time_limit)
            .with_auto_start(config.auto_start)
    }
}

/// Prompts sent to the grading model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Grader persona and the exact output schema.
    pub grader_prompt: String,
    /// User message; `{topic}`, `{difficulty}` and `{text}` are substituted.
    pub submission_template: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            grader_prompt: DEFAULT_GRADER_PROMPT.to_string(),
            submission_template: DEFAULT_SUBMISSION_TEMPLATE.to_string(),
        }
    }
}

impl PromptsConfig {
    /// Get the user message for a submission, with placeholders replaced.
    pub fn submission(&self, topic: &str, difficulty: Difficulty, text: &str) -> String {
        // {text} last so a submission containing "{topic}" is left verbatim.
        self.submission_template
            .replace("{topic}", topic)
            .replace("{difficulty}", &difficulty.to_string())
            .replace("{text}", text)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DebatorError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| DebatorError::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Load configuration from string content.
    pub fn parse(content: &str) -> Result<Self, DebatorError> {
        toml::from_str(content)
            .map_err(|e| DebatorError::ConfigError(format!("Failed to parse config: {}", e)))
    }
}

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const DEFAULT_GRADER_PROMPT: &str = r#"You are a debate coach. Return ONLY valid JSON with:
{
  "scores": {"structure": int, "clarity": int, "evidence": int, "rhetoric": int},
  "summary": "short evaluation",
  "improvements": ["tip1", "tip2", "tip3"],
  "suggested_practice": ["ex1", "ex2", "ex3"]
}
Scores are integers from 0 to 100. Give exactly three improvements and exactly three practice suggestions.
Be specific and constructive. No extra text."#;

const DEFAULT_SUBMISSION_TEMPLATE: &str =
    "Topic: {topic}\nDifficulty: {difficulty}/5\nResponse:\n```\n{text}\n```";
