//! Parsing of shell command lines.

use std::path::PathBuf;

use debator_core::{Difficulty, Screen, TimeLimit, Topic};

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Tab(Screen),
    Topics,
    Topic(Topic),
    Difficulty(Difficulty),
    TimeLimit(TimeLimit),
    AutoStart(bool),
    NewPrompt,
    Start,
    Pause,
    /// "Stop & Reset" on the prompts screen.
    Stop,
    /// "Reset All" in the sidebar.
    Reset,
    Write(String),
    Append(String),
    Submit,
    CrossEx,
    GetFeedback,
    Download(Option<PathBuf>),
    Status,
    Quit,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" | "status" | "s" => Command::Status,
        "help" | "h" | "?" => Command::Help,
        "1" | "2" | "3" => Command::Tab(parse_screen(word)?),
        "tab" | "go" => Command::Tab(parse_screen(required(word, rest)?)?),
        "topics" => Command::Topics,
        "topic" => Command::Topic(parse_topic(required(word, rest)?)?),
        "difficulty" | "diff" => Command::Difficulty(parse_difficulty(required(word, rest)?)?),
        "time" => Command::TimeLimit(parse_time_limit(required(word, rest)?)?),
        "autostart" | "auto" => Command::AutoStart(parse_switch(required(word, rest)?)?),
        "new" => Command::NewPrompt,
        "start" => Command::Start,
        "pause" => Command::Pause,
        "stop" => Command::Stop,
        "reset" => Command::Reset,
        "write" | "w" => Command::Write(rest.to_string()),
        "append" | "a" => Command::Append(rest.to_string()),
        "submit" => Command::Submit,
        "cross" => Command::CrossEx,
        "feedback" | "grade" => Command::GetFeedback,
        "download" | "save" => Command::Download((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
    };
    Ok(command)
}

pub fn parse_topic(value: &str) -> Result<Topic, String> {
    value.parse().map_err(|e: debator_core::DebatorError| e.to_string())
}

pub fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    value.parse().map_err(|e: debator_core::DebatorError| e.to_string())
}

pub fn parse_time_limit(value: &str) -> Result<TimeLimit, String> {
    value.parse().map_err(|e: debator_core::DebatorError| e.to_string())
}

fn parse_screen(value: &str) -> Result<Screen, String> {
    match value.to_lowercase().as_str() {
        "1" | "prompt" | "prompts" => Ok(Screen::Prompts),
        "2" | "crossing" | "cross" | "cross-ex" => Ok(Screen::Crossing),
        "3" | "feedback" => Ok(Screen::Feedback),
        other => Err(format!(
            "Unknown tab '{}'. Use prompts, crossing or feedback.",
            other
        )),
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("Expected on or off, got '{}'", other)),
    }
}

fn required<'a>(word: &str, rest: &'a str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{}' needs a value. Type 'help' for usage.", word))
    } else {
        Ok(rest)
    }
}
