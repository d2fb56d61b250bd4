//! Per-user session state.

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackResult;
use crate::question_bank::CROSS_EX_LENGTH;
use crate::settings::TimeLimit;
use crate::timer::Timer;

/// One answered cross-examination question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Everything one user has in flight. Mutated in place by every action and
/// timer tick, replaced wholesale by [`Session::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub current_prompt: Option<String>,
    pub draft_answer: String,
    pub timer: Timer,
    pub feedback: Option<FeedbackResult>,
    /// Questions answered so far, in 0..=5.
    pub cross_ex_index: usize,
    /// Answer being typed for the current cross-ex question.
    pub cross_ex_draft: String,
    pub cross_ex_transcript: Vec<QuestionAnswer>,
}

impl Session {
    pub fn new(time_limit: TimeLimit) -> Self {
        Self {
            current_prompt: None,
            draft_answer: String::new(),
            timer: Timer::new(time_limit),
            feedback: None,
            cross_ex_index: 0,
            cross_ex_draft: String::new(),
            cross_ex_transcript: Vec::new(),
        }
    }

    /// Back to defaults. The time limit belongs to the settings and survives.
    pub fn reset(&mut self) {
        *self = Session::new(self.timer.limit());
    }

    pub fn cross_ex_complete(&self) -> bool {
        self.cross_ex_index >= CROSS_EX_LENGTH
    }

    /// All answered pairs as one block of text for grading.
    pub fn cross_ex_text(&self) -> String {
        self.cross_ex_transcript
            .iter()
            .map(|qa| format!("Q: {}\nA: {}", qa.question, qa.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TimeLimit::default())
    }
}
