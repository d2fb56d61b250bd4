//! Practice orchestration logic.
//!
//! Owns one user's session and applies every user action and timer tick to
//! it, one at a time. Front ends read the screen snapshots and report
//! actions back; nothing here draws or sleeps.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use crate::error::DebatorError;
use crate::feedback::{Evaluation, FeedbackClient};
use crate::question_bank::{CROSS_EX_LENGTH, Topic};
use crate::report::FeedbackReport;
use crate::screen::{CrossExScreen, FeedbackScreen, PromptScreen, is_submittable};
use crate::session::{QuestionAnswer, Session};
use crate::settings::{Difficulty, PracticeSettings, TimeLimit};
use crate::timer::{Clock, SystemClock, TimerTick};

/// Callback for practice events.
pub type PracticeCallback = Box<dyn Fn(PracticeEvent) + Send + Sync>;

/// What was sent for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSource {
    Response,
    CrossEx,
}

/// Events emitted while practicing.
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeEvent {
    /// A new prompt is on screen.
    PromptIssued { prompt: String },
    TimerStarted { limit_secs: u32 },
    TimerPaused { used_secs: u32 },
    /// The countdown hit zero. Sent once per expiry.
    TimeUp,
    /// A cross-ex answer was recorded; `number` is 1-based.
    AnswerRecorded { number: usize, question: String },
    CrossExComplete,
    /// A grading request is in flight.
    Evaluating { source: FeedbackSource },
    FeedbackReady { fallback: bool },
    /// Non-blocking warning to show the user.
    FeedbackWarning { message: String },
    Reset,
}

/// Drives one practice session.
pub struct PracticeOrchestrator {
    settings: PracticeSettings,
    session: Session,
    client: FeedbackClient,
    clock: Arc<dyn Clock>,
    callback: Option<PracticeCallback>,
}

impl PracticeOrchestrator {
    /// Create an orchestrator with a fresh session.
    pub fn new(settings: PracticeSettings, client: FeedbackClient) -> Self {
        Self {
            session: Session::new(settings.time_limit),
            settings,
            client,
            clock: Arc::new(SystemClock),
            callback: None,
        }
    }

    /// Read time from `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set a callback for practice events.
    pub fn with_callback(mut self, callback: PracticeCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timer_running(&self) -> bool {
        self.session.timer.is_active()
    }

    /// One refresh pass: expire the timer if its limit has passed.
    pub fn tick(&mut self) -> TimerTick {
        let tick = self.session.timer.tick(self.now());
        if tick == TimerTick::Expired {
            self.emit_event(PracticeEvent::TimeUp);
        }
        tick
    }

    /// Switch topic. A different topic discards everything in progress.
    ///
    /// Returns whether the session was reset.
    pub fn select_topic(&mut self, topic: Topic) -> bool {
        if topic == self.settings.topic {
            return false;
        }
        tracing::debug!(from = %self.settings.topic, to = %topic, "topic changed");
        self.settings.topic = topic;
        self.reset_all();
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    /// Applies to the running countdown too.
    pub fn set_time_limit(&mut self, time_limit: TimeLimit) {
        self.settings.time_limit = time_limit;
        self.session.timer.set_limit(time_limit);
    }

    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.settings.auto_start = auto_start;
    }

    /// Discard the whole session, feedback included.
    pub fn reset_all(&mut self) {
        self.session.reset();
        tracing::debug!("session reset");
        self.emit_event(PracticeEvent::Reset);
    }

    /// "New Prompt": fresh prompt for the selected topic and an empty draft.
    pub fn new_prompt(&mut self) -> &str {
        self.tick();
        let prompt = self.settings.topic.prompt();
        self.session.current_prompt = Some(prompt.to_string());
        self.session.draft_answer.clear();
        tracing::info!(topic = %self.settings.topic, "prompt issued");
        self.emit_event(PracticeEvent::PromptIssued {
            prompt: prompt.to_string(),
        });

        if self.settings.auto_start {
            self.start_countdown();
        } else {
            self.stop_countdown();
        }
        prompt
    }

    /// Manual start. Only offered when auto-start is off and the timer is idle.
    pub fn start_timer(&mut self) -> Result<(), DebatorError> {
        self.tick();
        if !self.prompt_screen().show_start {
            return Err(DebatorError::Unavailable("start"));
        }
        self.start_countdown();
        Ok(())
    }

    pub fn pause_timer(&mut self) -> Result<(), DebatorError> {
        self.tick();
        if !self.timer_running() {
            return Err(DebatorError::Unavailable("pause"));
        }
        self.stop_countdown();
        Ok(())
    }

    /// "Stop & Reset".
    pub fn stop_and_reset(&mut self) {
        self.reset_all();
    }

    /// Replace the draft response.
    pub fn write_response(&mut self, text: &str) -> Result<(), DebatorError> {
        self.ensure_prompt_editable()?;
        self.session.draft_answer = text.to_string();
        Ok(())
    }

    /// Add a line to the draft response.
    pub fn append_response(&mut self, line: &str) -> Result<(), DebatorError> {
        self.ensure_prompt_editable()?;
        push_line(&mut self.session.draft_answer, line);
        Ok(())
    }

    /// "Submit Response": grade the draft and replace the session's feedback.
    pub async fn submit_response(&mut self) -> Result<Evaluation, DebatorError> {
        self.tick();
        if self.session.current_prompt.is_none() {
            return Err(DebatorError::NoActivePrompt);
        }
        if !is_submittable(&self.session.draft_answer) {
            return Err(DebatorError::EmptySubmission);
        }
        let text = self.session.draft_answer.clone();
        Ok(self.grade(&text, FeedbackSource::Response).await)
    }

    /// "Start Cross-Ex": clear the transcript and start on question one.
    pub fn start_cross_ex(&mut self) {
        self.tick();
        self.session.cross_ex_transcript.clear();
        self.session.cross_ex_index = 0;
        self.session.cross_ex_draft.clear();
        tracing::info!(topic = %self.settings.topic, "cross-examination started");
        self.start_countdown();
    }

    /// Replace the answer to the current cross-ex question.
    pub fn write_cross_answer(&mut self, text: &str) -> Result<(), DebatorError> {
        self.ensure_cross_ex_editable()?;
        self.session.cross_ex_draft = text.to_string();
        Ok(())
    }

    /// Add a line to the answer for the current cross-ex question.
    pub fn append_cross_answer(&mut self, line: &str) -> Result<(), DebatorError> {
        self.ensure_cross_ex_editable()?;
        push_line(&mut self.session.cross_ex_draft, line);
        Ok(())
    }

    /// "Submit Answer": record the pair, move on and restart the countdown.
    pub fn submit_answer(&mut self) -> Result<(), DebatorError> {
        self.tick();
        if self.session.cross_ex_complete() {
            return Err(DebatorError::CrossExFinished);
        }
        if !is_submittable(&self.session.cross_ex_draft) {
            return Err(DebatorError::EmptySubmission);
        }

        let question = self.current_question();
        let answer = std::mem::take(&mut self.session.cross_ex_draft);
        self.session.cross_ex_transcript.push(QuestionAnswer {
            question: question.to_string(),
            answer,
        });
        self.session.cross_ex_index += 1;
        self.emit_event(PracticeEvent::AnswerRecorded {
            number: self.session.cross_ex_index,
            question: question.to_string(),
        });

        if self.session.cross_ex_complete() {
            self.stop_countdown();
            self.emit_event(PracticeEvent::CrossExComplete);
        } else {
            self.start_countdown();
        }
        Ok(())
    }

    /// "Get Feedback" on a finished cross-examination.
    pub async fn cross_ex_feedback(&mut self) -> Result<Evaluation, DebatorError> {
        self.tick();
        if !self.session.cross_ex_complete() {
            return Err(DebatorError::CrossExInProgress {
                answered: self.session.cross_ex_index,
            });
        }
        let text = self.session.cross_ex_text();
        Ok(self.grade(&text, FeedbackSource::CrossEx).await)
    }

    pub fn prompt_screen(&self) -> PromptScreen {
        let running = self.timer_running();
        let has_prompt = self.session.current_prompt.is_some();
        PromptScreen {
            prompt: self.session.current_prompt.clone(),
            draft: self.session.draft_answer.clone(),
            editable: has_prompt && running,
            timer: self.session.timer.view(self.now()),
            show_start: has_prompt && !running && !self.settings.auto_start,
            show_pause: has_prompt && running,
            can_submit: has_prompt && is_submittable(&self.session.draft_answer),
        }
    }

    pub fn cross_ex_screen(&self) -> CrossExScreen {
        if self.session.cross_ex_complete() {
            return CrossExScreen::Complete {
                transcript: self.session.cross_ex_transcript.clone(),
            };
        }
        CrossExScreen::Question {
            number: self.session.cross_ex_index + 1,
            total: CROSS_EX_LENGTH,
            question: self.current_question(),
            draft: self.session.cross_ex_draft.clone(),
            editable: self.timer_running(),
            timer: self.session.timer.view(self.now()),
            can_submit: is_submittable(&self.session.cross_ex_draft),
        }
    }

    pub fn feedback_screen(&self) -> FeedbackScreen {
        match (&self.session.feedback, self.report()) {
            (Some(feedback), Some(report)) => FeedbackScreen::Ready {
                feedback: feedback.clone(),
                report,
            },
            _ => FeedbackScreen::Empty,
        }
    }

    /// Latest feedback with the current settings, ready for download.
    pub fn report(&self) -> Option<FeedbackReport> {
        let feedback = self.session.feedback.as_ref()?;
        let timestamp: DateTime<Local> = self.now().with_timezone(&Local);
        Some(FeedbackReport::new(timestamp, &self.settings, feedback))
    }

    async fn grade(&mut self, text: &str, source: FeedbackSource) -> Evaluation {
        self.emit_event(PracticeEvent::Evaluating { source });
        let evaluation = self
            .client
            .evaluate(text, self.settings.topic.name(), self.settings.difficulty)
            .await;

        if let Some(message) = evaluation.warning() {
            self.emit_event(PracticeEvent::FeedbackWarning {
                message: message.to_string(),
            });
        }
        self.session.feedback = Some(evaluation.feedback().clone());
        self.emit_event(PracticeEvent::FeedbackReady {
            fallback: evaluation.is_fallback(),
        });
        evaluation
    }

    fn current_question(&self) -> &'static str {
        let questions = self.settings.topic.cross_ex_questions();
        questions[self.session.cross_ex_index.min(CROSS_EX_LENGTH - 1)]
    }

    fn ensure_prompt_editable(&mut self) -> Result<(), DebatorError> {
        self.tick();
        if self.session.current_prompt.is_none() {
            return Err(DebatorError::NoActivePrompt);
        }
        if !self.timer_running() {
            return Err(DebatorError::EditLocked);
        }
        Ok(())
    }

    fn ensure_cross_ex_editable(&mut self) -> Result<(), DebatorError> {
        self.tick();
        if self.session.cross_ex_complete() {
            return Err(DebatorError::CrossExFinished);
        }
        if !self.timer_running() {
            return Err(DebatorError::EditLocked);
        }
        Ok(())
    }

    fn start_countdown(&mut self) {
        self.session.timer.start(self.now());
        self.emit_event(PracticeEvent::TimerStarted {
            limit_secs: self.settings.time_limit.seconds(),
        });
    }

    fn stop_countdown(&mut self) {
        if !self.timer_running() {
            return;
        }
        let now = self.now();
        self.session.timer.pause(now);
        self.emit_event(PracticeEvent::TimerPaused {
            used_secs: self.session.timer.view(now).used_secs,
        });
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Emit an event if a callback is registered.
    fn emit_event(&self, event: PracticeEvent) {
        if let Some(ref callback) = self.callback {
            callback(event);
        }
    }
}

fn push_line(draft: &mut String, line: &str) {
    if !draft.is_empty() {
        draft.push('\n');
    }
    draft.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptsConfig;
    use crate::feedback::testing::{GOOD_REPLY, ScriptedBackend};
    use crate::feedback::{FALLBACK_WARNING, FeedbackResult};
    use crate::timer::{ManualClock, TimerPhase};
    use std::sync::Mutex;

    struct Harness {
        orchestrator: PracticeOrchestrator,
        clock: ManualClock,
        events: Arc<Mutex<Vec<PracticeEvent>>>,
    }

    impl Harness {
        fn new(settings: PracticeSettings, backend: ScriptedBackend) -> Self {
            let clock = ManualClock::default();
            let events: Arc<Mutex<Vec<PracticeEvent>>> = Arc::default();
            let sink = Arc::clone(&events);
            let client = FeedbackClient::new(Box::new(backend), PromptsConfig::default());
            let orchestrator = PracticeOrchestrator::new(settings, client)
                .with_clock(Arc::new(clock.clone()))
                .with_callback(Box::new(move |event| sink.lock().unwrap().push(event)));
            Self {
                orchestrator,
                clock,
                events,
            }
        }

        fn count(&self, wanted: &PracticeEvent) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|event| *event == wanted)
                .count()
        }
    }

    fn settings(topic: Topic) -> PracticeSettings {
        PracticeSettings::new(topic)
    }

    #[test]
    fn test_new_prompt_with_auto_start_then_expiry() {
        let mut h = Harness::new(
            settings(Topic::Technology)
                .with_difficulty(Difficulty::new(4).unwrap())
                .with_time_limit(TimeLimit::NinetySeconds)
                .with_auto_start(true),
            ScriptedBackend::replying(GOOD_REPLY),
        );

        let prompt = h.orchestrator.new_prompt().to_string();
        assert_eq!(
            prompt,
            "Do social media algorithms harm democracy more than they help?"
        );
        let screen = h.orchestrator.prompt_screen();
        assert_eq!(screen.timer.phase, TimerPhase::Running);
        assert_eq!(screen.timer.remaining_secs, 90);
        assert!(screen.editable);
        assert!(!screen.show_start);
        assert!(screen.show_pause);

        h.clock.advance_secs(91.0);
        assert_eq!(h.orchestrator.tick(), TimerTick::Expired);
        assert_eq!(h.orchestrator.tick(), TimerTick::Idle);

        let screen = h.orchestrator.prompt_screen();
        assert_eq!(screen.timer.phase, TimerPhase::Paused);
        assert_eq!(screen.timer.remaining_secs, 0);
        assert!(!screen.editable);
        assert_eq!(h.count(&PracticeEvent::TimeUp), 1);
    }

    #[test]
    fn test_new_prompt_without_auto_start_waits_for_start() {
        let mut h = Harness::new(
            settings(Topic::Science).with_auto_start(false),
            ScriptedBackend::replying(GOOD_REPLY),
        );
        assert!(h.orchestrator.prompt_screen().prompt.is_none());
        assert!(h.orchestrator.start_timer().is_err());

        h.orchestrator.new_prompt();
        let screen = h.orchestrator.prompt_screen();
        assert_eq!(screen.timer.phase, TimerPhase::NotStarted);
        assert!(screen.show_start);
        assert!(matches!(
            h.orchestrator.write_response("early"),
            Err(DebatorError::EditLocked)
        ));

        h.orchestrator.start_timer().unwrap();
        assert!(h.orchestrator.timer_running());
        h.orchestrator.write_response("now it counts").unwrap();
        assert_eq!(h.orchestrator.session().draft_answer, "now it counts");
    }

    #[test]
    fn test_edit_before_any_prompt_is_refused() {
        let mut h = Harness::new(settings(Topic::Ethics), ScriptedBackend::replying(GOOD_REPLY));
        assert!(matches!(
            h.orchestrator.write_response("x"),
            Err(DebatorError::NoActivePrompt)
        ));
    }

    #[test]
    fn test_edit_locked_after_expiry_even_without_tick() {
        let mut h = Harness::new(settings(Topic::Ethics), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.new_prompt();
        h.orchestrator.append_response("first").unwrap();
        h.orchestrator.append_response("second").unwrap();
        h.clock.advance_secs(61.0);

        assert!(matches!(
            h.orchestrator.append_response("late"),
            Err(DebatorError::EditLocked)
        ));
        assert_eq!(h.orchestrator.session().draft_answer, "first\nsecond");
        assert_eq!(h.count(&PracticeEvent::TimeUp), 1);
        assert!(h.orchestrator.prompt_screen().can_submit);
    }

    #[test]
    fn test_pause_and_manual_controls() {
        let mut h = Harness::new(settings(Topic::History), ScriptedBackend::replying(GOOD_REPLY));
        assert!(matches!(
            h.orchestrator.pause_timer(),
            Err(DebatorError::Unavailable("pause"))
        ));
        h.orchestrator.new_prompt();
        h.clock.advance_secs(12.0);
        h.orchestrator.pause_timer().unwrap();
        h.clock.advance_secs(40.0);

        let screen = h.orchestrator.prompt_screen();
        assert_eq!(screen.timer.phase, TimerPhase::Paused);
        assert_eq!(screen.timer.used_secs, 12);
        assert!(!screen.show_pause);
        // auto-start hides the manual start control
        assert!(!screen.show_start);
        assert_eq!(h.count(&PracticeEvent::TimerPaused { used_secs: 12 }), 1);
    }

    #[tokio::test]
    async fn test_submit_response_rejects_blank_drafts() {
        let backend = ScriptedBackend::replying(GOOD_REPLY);
        let mut h = Harness::new(settings(Topic::Ethics), backend.clone());
        h.orchestrator.new_prompt();

        for blank in ["", "   ", "\n\t"] {
            h.orchestrator.write_response(blank).unwrap();
            assert!(!h.orchestrator.prompt_screen().can_submit);
            assert!(matches!(
                h.orchestrator.submit_response().await,
                Err(DebatorError::EmptySubmission)
            ));
        }
        assert!(h.orchestrator.session().feedback.is_none());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_response_stores_feedback() {
        let backend = ScriptedBackend::replying(GOOD_REPLY);
        let mut h = Harness::new(settings(Topic::Economics), backend.clone());
        h.orchestrator.new_prompt();
        h.orchestrator.write_response("Caps distort markets.").unwrap();

        let evaluation = h.orchestrator.submit_response().await.unwrap();
        assert!(!evaluation.is_fallback());
        assert_eq!(
            h.orchestrator.session().feedback.as_ref(),
            Some(evaluation.feedback())
        );
        assert!(backend.requests()[0].user_message.contains("Caps distort markets."));
        assert_eq!(
            h.count(&PracticeEvent::Evaluating {
                source: FeedbackSource::Response
            }),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_grading_falls_back_and_reports() {
        let mut h = Harness::new(
            settings(Topic::Ethics).with_difficulty(Difficulty::new(3).unwrap()),
            ScriptedBackend::failing("upstream unavailable"),
        );
        h.orchestrator.new_prompt();
        h.orchestrator.write_response("AI is risky.").unwrap();

        let evaluation = h.orchestrator.submit_response().await.unwrap();
        assert!(evaluation.is_fallback());
        assert_eq!(
            h.count(&PracticeEvent::FeedbackWarning {
                message: FALLBACK_WARNING.to_string()
            }),
            1
        );

        match h.orchestrator.feedback_screen() {
            FeedbackScreen::Ready { feedback, report } => {
                assert_eq!(
                    feedback.summary,
                    "Solid start! Add more evidence and tighten your structure."
                );
                assert_eq!(
                    feedback.scores.entries().map(|(_, score)| score),
                    [70, 75, 60, 65]
                );
                assert_eq!(report.topic, "Ethics");
                assert_eq!(report.difficulty, 3);
            }
            FeedbackScreen::Empty => panic!("feedback screen should be populated"),
        }
    }

    #[tokio::test]
    async fn test_new_submission_replaces_feedback() {
        let mut h = Harness::new(
            settings(Topic::Ethics),
            ScriptedBackend::failing("down"),
        );
        h.orchestrator.new_prompt();
        h.orchestrator.write_response("one").unwrap();
        h.orchestrator.submit_response().await.unwrap();
        assert_eq!(
            h.orchestrator.session().feedback,
            Some(FeedbackResult::fallback())
        );

        h.orchestrator.client =
            FeedbackClient::new(Box::new(ScriptedBackend::replying(GOOD_REPLY)), PromptsConfig::default());
        h.orchestrator.submit_response().await.unwrap();
        let feedback = h.orchestrator.session().feedback.clone().unwrap();
        assert_eq!(feedback.scores.structure, 82);
    }

    #[tokio::test]
    async fn test_cross_ex_runs_five_questions_in_order() {
        let backend = ScriptedBackend::replying(GOOD_REPLY);
        let mut h = Harness::new(settings(Topic::Ethics), backend.clone());
        h.orchestrator.start_cross_ex();

        for i in 0..CROSS_EX_LENGTH {
            match h.orchestrator.cross_ex_screen() {
                CrossExScreen::Question {
                    number,
                    editable,
                    timer,
                    ..
                } => {
                    assert_eq!(number, i + 1);
                    assert!(editable);
                    assert_eq!(timer.remaining_secs, 60);
                }
                CrossExScreen::Complete { .. } => panic!("completed early"),
            }
            h.clock.advance_secs(10.0);
            h.orchestrator
                .write_cross_answer(&format!("answer {}", i + 1))
                .unwrap();
            h.orchestrator.submit_answer().unwrap();
        }

        let session = h.orchestrator.session();
        assert_eq!(session.cross_ex_index, 5);
        let questions: Vec<&str> = session
            .cross_ex_transcript
            .iter()
            .map(|qa| qa.question.as_str())
            .collect();
        assert_eq!(questions, Topic::Ethics.cross_ex_questions());
        assert!(!h.orchestrator.timer_running());
        assert_eq!(h.count(&PracticeEvent::CrossExComplete), 1);
        assert!(matches!(
            h.orchestrator.submit_answer(),
            Err(DebatorError::CrossExFinished)
        ));

        h.orchestrator.cross_ex_feedback().await.unwrap();
        let message = &backend.requests()[0].user_message;
        assert!(message.contains(
            "Q: Which ethical framework guides your view?\nA: answer 1\n\nQ: How do you weigh"
        ));
        assert!(matches!(
            h.orchestrator.cross_ex_screen(),
            CrossExScreen::Complete { ref transcript } if transcript.len() == 5
        ));
    }

    #[test]
    fn test_cross_ex_blank_answer_is_rejected_without_mutation() {
        let mut h = Harness::new(settings(Topic::Science), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.start_cross_ex();
        h.orchestrator.write_cross_answer("   ").unwrap();
        assert!(matches!(
            h.orchestrator.submit_answer(),
            Err(DebatorError::EmptySubmission)
        ));
        assert_eq!(h.orchestrator.session().cross_ex_index, 0);
        assert!(h.orchestrator.session().cross_ex_transcript.is_empty());
    }

    #[test]
    fn test_cross_ex_expiry_pauses_without_advancing() {
        let mut h = Harness::new(settings(Topic::Science), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.start_cross_ex();
        h.orchestrator.write_cross_answer("partial").unwrap();
        h.clock.advance_secs(75.0);
        assert_eq!(h.orchestrator.tick(), TimerTick::Expired);

        match h.orchestrator.cross_ex_screen() {
            CrossExScreen::Question {
                number,
                editable,
                can_submit,
                ..
            } => {
                assert_eq!(number, 1);
                assert!(!editable);
                assert!(can_submit);
            }
            CrossExScreen::Complete { .. } => panic!("expiry must not advance"),
        }

        h.orchestrator.submit_answer().unwrap();
        assert_eq!(h.orchestrator.session().cross_ex_index, 1);
        assert!(h.orchestrator.timer_running());
    }

    #[tokio::test]
    async fn test_cross_ex_feedback_requires_all_answers() {
        let mut h = Harness::new(settings(Topic::Science), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.start_cross_ex();
        h.orchestrator.write_cross_answer("one").unwrap();
        h.orchestrator.submit_answer().unwrap();
        assert!(matches!(
            h.orchestrator.cross_ex_feedback().await,
            Err(DebatorError::CrossExInProgress { answered: 1 })
        ));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut h = Harness::new(
            settings(Topic::Ethics).with_time_limit(TimeLimit::TwoMinutes),
            ScriptedBackend::failing("down"),
        );
        h.orchestrator.new_prompt();
        h.orchestrator.write_response("text").unwrap();
        h.orchestrator.submit_response().await.unwrap();
        h.orchestrator.start_cross_ex();
        h.orchestrator.write_cross_answer("a").unwrap();
        h.orchestrator.submit_answer().unwrap();

        h.orchestrator.stop_and_reset();

        assert_eq!(
            h.orchestrator.session(),
            &Session::new(TimeLimit::TwoMinutes)
        );
        assert_eq!(h.orchestrator.feedback_screen(), FeedbackScreen::Empty);
        assert!(h.orchestrator.report().is_none());
        assert_eq!(h.count(&PracticeEvent::Reset), 1);
    }

    #[test]
    fn test_topic_change_resets_session() {
        let mut h = Harness::new(settings(Topic::Science), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.new_prompt();

        assert!(!h.orchestrator.select_topic(Topic::Science));
        assert!(h.orchestrator.session().current_prompt.is_some());

        assert!(h.orchestrator.select_topic(Topic::Environment));
        assert!(h.orchestrator.session().current_prompt.is_none());
        assert!(!h.orchestrator.timer_running());
        assert_eq!(h.orchestrator.settings().topic, Topic::Environment);
    }

    #[test]
    fn test_time_limit_change_applies_to_running_timer() {
        let mut h = Harness::new(settings(Topic::Science), ScriptedBackend::replying(GOOD_REPLY));
        h.orchestrator.new_prompt();
        h.clock.advance_secs(30.0);
        h.orchestrator.set_time_limit(TimeLimit::TwoMinutes);
        assert_eq!(h.orchestrator.prompt_screen().timer.remaining_secs, 90);
    }
}
