//! Countdown timer for timed answers.
//!
//! The timer never runs on its own thread. Whoever drives the page calls
//! [`Timer::tick`] roughly once per second while it is running; each tick
//! derives the remaining time from the start timestamp.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

use crate::settings::TimeLimit;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    pub fn advance_secs(&self, seconds: f64) {
        self.millis
            .fetch_add((seconds * 1000.0).round() as i64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

/// Where the countdown is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Never started since the last reset.
    NotStarted,
    Running,
    Paused,
}

/// What to draw for the timer right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerView {
    pub phase: TimerPhase,
    /// Whole seconds left on the clock.
    pub remaining_secs: u32,
    /// Whole seconds used, capped at the limit.
    pub used_secs: u32,
    /// Bar fill in 0.0..=1.0: remaining/limit while running, used/limit when paused.
    pub progress: f64,
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerTick {
    /// Not running; nothing to refresh.
    Idle,
    /// Still counting down; schedule another refresh.
    Running(TimerView),
    /// The limit was reached on this tick. Reported once per expiry.
    Expired,
}

/// Countdown state. `started_at` is set iff the timer was started since the last
/// clear, and `active` implies `started_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    active: bool,
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    limit: TimeLimit,
}

impl Timer {
    pub fn new(limit: TimeLimit) -> Self {
        Self {
            active: false,
            started_at: None,
            stopped_at: None,
            limit,
        }
    }

    pub fn limit(&self) -> TimeLimit {
        self.limit
    }

    pub fn set_limit(&mut self, limit: TimeLimit) {
        self.limit = limit;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn phase(&self) -> TimerPhase {
        match (self.active, self.started_at) {
            (true, _) => TimerPhase::Running,
            (false, Some(_)) => TimerPhase::Paused,
            (false, None) => TimerPhase::NotStarted,
        }
    }

    /// Start a fresh countdown from the full limit.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.stopped_at = None;
        self.active = true;
    }

    /// Freeze the countdown. No-op unless running.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.active {
            self.active = false;
            self.stopped_at = Some(now);
        }
    }

    /// Back to the never-started state.
    pub fn clear(&mut self) {
        self.active = false;
        self.started_at = None;
        self.stopped_at = None;
    }

    /// Seconds since start, up to now while running or up to the pause moment.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let until = if self.active {
            now
        } else {
            self.stopped_at.unwrap_or(now)
        };
        seconds(until - started_at).max(0.0)
    }

    pub fn remaining_secs(&self, now: DateTime<Utc>) -> f64 {
        (self.limit_secs() - self.elapsed_secs(now)).max(0.0)
    }

    pub fn view(&self, now: DateTime<Utc>) -> TimerView {
        let limit = self.limit_secs();
        let remaining = self.remaining_secs(now);
        let used = self.elapsed_secs(now).min(limit).floor();
        let phase = self.phase();
        let progress = match phase {
            TimerPhase::Running => remaining / limit,
            TimerPhase::Paused => used / limit,
            TimerPhase::NotStarted => 0.0,
        };
        TimerView {
            phase,
            remaining_secs: remaining.floor() as u32,
            used_secs: used as u32,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// One refresh pass. Pauses the timer when the limit has been reached.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimerTick {
        if !self.active {
            return TimerTick::Idle;
        }
        if self.remaining_secs(now) <= 0.0 {
            self.pause(now);
            tracing::debug!("timer expired after {}", self.limit);
            return TimerTick::Expired;
        }
        TimerTick::Running(self.view(now))
    }

    fn limit_secs(&self) -> f64 {
        f64::from(self.limit.seconds())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TimeLimit::default())
    }
}

fn seconds(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}
