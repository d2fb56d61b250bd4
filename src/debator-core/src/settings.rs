//! Practice settings chosen by the user.
//!
//! Topic, difficulty, time limit and the auto-start toggle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DebatorError;
use crate::question_bank::Topic;

/// Difficulty level in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, DebatorError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(DebatorError::InvalidDifficulty(level.to_string()))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Difficulty {
    type Err = DebatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .trim()
            .parse::<u8>()
            .map_err(|_| DebatorError::InvalidDifficulty(s.trim().to_string()))?;
        Self::new(level)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DebatorError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

/// Countdown length for one answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeLimit {
    #[default]
    OneMinute,
    NinetySeconds,
    TwoMinutes,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 3] = [
        TimeLimit::OneMinute,
        TimeLimit::NinetySeconds,
        TimeLimit::TwoMinutes,
    ];

    pub fn seconds(&self) -> u32 {
        match self {
            TimeLimit::OneMinute => 60,
            TimeLimit::NinetySeconds => 90,
            TimeLimit::TwoMinutes => 120,
        }
    }

    pub fn from_seconds(seconds: u32) -> Result<Self, DebatorError> {
        TimeLimit::ALL
            .into_iter()
            .find(|limit| limit.seconds() == seconds)
            .ok_or_else(|| DebatorError::InvalidTimeLimit(seconds.to_string()))
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

impl FromStr for TimeLimit {
    type Err = DebatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let seconds = trimmed
            .strip_suffix('s')
            .unwrap_or(trimmed)
            .parse::<u32>()
            .map_err(|_| DebatorError::InvalidTimeLimit(trimmed.to_string()))?;
        Self::from_seconds(seconds)
    }
}

impl TryFrom<u32> for TimeLimit {
    type Error = DebatorError;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        Self::from_seconds(seconds)
    }
}

impl From<TimeLimit> for u32 {
    fn from(limit: TimeLimit) -> Self {
        limit.seconds()
    }
}

/// The sidebar: everything the user picks before practicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSettings {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub time_limit: TimeLimit,
    /// Start the countdown as soon as a prompt is generated.
    pub auto_start: bool,
}

impl PracticeSettings {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_time_limit(mut self, time_limit: TimeLimit) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            topic: Topic::default(),
            difficulty: Difficulty::default(),
            time_limit: TimeLimit::default(),
            auto_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(0).is_err());
        assert_eq!(Difficulty::new(1).unwrap().level(), 1);
        assert_eq!(Difficulty::new(5).unwrap().level(), 5);
        assert!(Difficulty::new(6).is_err());
        assert!("x".parse::<Difficulty>().is_err());
        assert_eq!(" 4 ".parse::<Difficulty>().unwrap().level(), 4);
    }

    #[test]
    fn test_time_limit_parsing() {
        assert_eq!("60".parse::<TimeLimit>().unwrap(), TimeLimit::OneMinute);
        assert_eq!("90s".parse::<TimeLimit>().unwrap(), TimeLimit::NinetySeconds);
        assert_eq!("120".parse::<TimeLimit>().unwrap().seconds(), 120);
        assert!("45".parse::<TimeLimit>().is_err());
    }

    #[test]
    fn test_defaults_match_sidebar() {
        let settings = PracticeSettings::default();
        assert_eq!(settings.topic, Topic::Science);
        assert_eq!(settings.difficulty.level(), 3);
        assert_eq!(settings.time_limit.seconds(), 60);
        assert!(settings.auto_start);
    }

    #[test]
    fn test_builder() {
        let settings = PracticeSettings::new(Topic::Technology)
            .with_difficulty(Difficulty::new(4).unwrap())
            .with_time_limit(TimeLimit::NinetySeconds)
            .with_auto_start(false);
        assert_eq!(settings.topic, Topic::Technology);
        assert_eq!(settings.difficulty.level(), 4);
        assert_eq!(settings.time_limit.seconds(), 90);
        assert!(!settings.auto_start);
    }
}
