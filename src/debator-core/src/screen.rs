//! What each of the three screens shows and which controls are live.
//!
//! These are plain snapshots built by the orchestrator; any front end can
//! draw them without touching session state.

use crate::feedback::FeedbackResult;
use crate::report::FeedbackReport;
use crate::session::QuestionAnswer;
use crate::timer::TimerView;

/// The screens, in navigation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Prompts,
    Crossing,
    Feedback,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Prompts, Screen::Crossing, Screen::Feedback];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Prompts => "Prompts",
            Screen::Crossing => "Crossing",
            Screen::Feedback => "Feedback",
        }
    }
}

/// A submission is accepted iff it has a non-whitespace character.
pub fn is_submittable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Prompt practice screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptScreen {
    /// `None` until the first "New Prompt".
    pub prompt: Option<String>,
    pub draft: String,
    /// Answer field accepts edits only while the timer runs.
    pub editable: bool,
    pub timer: TimerView,
    pub show_start: bool,
    pub show_pause: bool,
    pub can_submit: bool,
}

/// Cross-examination screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossExScreen {
    Question {
        /// 1-based.
        number: usize,
        total: usize,
        question: &'static str,
        draft: String,
        editable: bool,
        timer: TimerView,
        can_submit: bool,
    },
    Complete {
        transcript: Vec<QuestionAnswer>,
    },
}

/// Feedback screen.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackScreen {
    /// Nothing submitted yet.
    Empty,
    Ready {
        feedback: FeedbackResult,
        report: FeedbackReport,
    },
}
