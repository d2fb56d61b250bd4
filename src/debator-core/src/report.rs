//! Downloadable JSON feedback report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::DebatorError;
use crate::feedback::{FeedbackResult, Scores};
use crate::settings::PracticeSettings;

pub const REPORT_FILE_NAME: &str = "intense_debator_feedback.json";
pub const REPORT_MIME: &str = "application/json";

/// Feedback plus the settings it was produced under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub timestamp: DateTime<Local>,
    pub topic: String,
    pub difficulty: u8,
    pub time_limit_sec: u32,
    pub scores: Scores,
    pub summary: String,
    pub improvements: [String; 3],
    pub suggested_practice: [String; 3],
}

impl FeedbackReport {
    pub fn new(
        timestamp: DateTime<Local>,
        settings: &PracticeSettings,
        feedback: &FeedbackResult,
    ) -> Self {
        Self {
            timestamp,
            topic: settings.topic.to_string(),
            difficulty: settings.difficulty.level(),
            time_limit_sec: settings.time_limit.seconds(),
            scores: feedback.scores,
            summary: feedback.summary.clone(),
            improvements: feedback.improvements.clone(),
            suggested_practice: feedback.suggested_practice.clone(),
        }
    }

    /// Two-space indented JSON.
    pub fn to_json(&self) -> Result<String, DebatorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report into `dir` under [`REPORT_FILE_NAME`].
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, DebatorError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(REPORT_FILE_NAME);
        fs::write(&path, self.to_json()?)?;
        tracing::info!("wrote feedback report to {}", path.display());
        Ok(path)
    }
}
