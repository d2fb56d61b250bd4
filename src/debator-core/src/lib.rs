//! Intense Debator Core Library
//!
//! Timed debate practice: canned prompts and cross-examination questions,
//! a cooperative countdown timer, per-user session state, and scored
//! feedback from a language model with a fixed fallback.

pub mod config;
pub mod error;
pub mod feedback;
pub mod orchestrator;
pub mod question_bank;
pub mod report;
pub mod screen;
pub mod session;
pub mod settings;
pub mod timer;

pub use config::Config;
pub use error::DebatorError;
pub use feedback::{Evaluation, FeedbackClient, FeedbackResult, GradingBackend, OpenAiGrader, Scores};
pub use orchestrator::{FeedbackSource, PracticeCallback, PracticeEvent, PracticeOrchestrator};
pub use question_bank::Topic;
pub use report::FeedbackReport;
pub use screen::{CrossExScreen, FeedbackScreen, PromptScreen, Screen};
pub use session::{QuestionAnswer, Session};
pub use settings::{Difficulty, PracticeSettings, TimeLimit};
pub use timer::{Clock, ManualClock, SystemClock, TimerPhase, TimerTick, TimerView};
