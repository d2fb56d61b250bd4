//! Console rendering for screens and practice events.

use std::io::{self, Write};

use colored::Colorize;
use debator_core::question_bank::available_topics;
use debator_core::{
    CrossExScreen, FeedbackScreen, FeedbackSource, PracticeEvent, PracticeOrchestrator,
    PracticeSettings, PromptScreen, Screen, TimerPhase, TimerView,
};

const WIDTH: usize = 70;
const BAR_WIDTH: usize = 30;

pub fn header() {
    println!();
    println!("{}", "═".repeat(WIDTH).bright_blue());
    println!(
        "{}",
        format!("  💬 {} - timed debate practice", "Intense Debator".bold())
            .bright_blue()
            .bold()
    );
    println!("{}", "═".repeat(WIDTH).bright_blue());
    println!("  1. Pick a topic   2. Set time & difficulty   3. 'new' on Prompts");
    println!("  4. Type while the timer runs   5. 'submit', then see Feedback");
    println!("  Type {} for all commands.", "help".bold());
}

pub fn input_prompt() {
    print!("{} ", ">".bright_cyan().bold());
    let _ = io::stdout().flush();
}

pub fn screen(orchestrator: &PracticeOrchestrator, current: Screen) {
    println!();
    tabs(current);
    sidebar(orchestrator.settings());
    println!("{}", "─".repeat(WIDTH).dimmed());
    match current {
        Screen::Prompts => prompt_screen(&orchestrator.prompt_screen()),
        Screen::Crossing => cross_ex_screen(&orchestrator.cross_ex_screen()),
        Screen::Feedback => feedback_screen(&orchestrator.feedback_screen()),
    }
}

fn tabs(current: Screen) {
    let labels: Vec<String> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let label = format!(" {} {} ", i + 1, s.title());
            if *s == current {
                label.on_blue().white().bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect();
    println!("{}", labels.join(" "));
}

fn sidebar(settings: &PracticeSettings) {
    println!(
        "  {} {}   {} {}/5   {} {}   {} {}",
        "Topic:".bold(),
        settings.topic.to_string().bright_white(),
        "Difficulty:".bold(),
        settings.difficulty,
        "Time:".bold(),
        settings.time_limit,
        "Auto-start:".bold(),
        if settings.auto_start { "on" } else { "off" }
    );
}

fn prompt_screen(screen: &PromptScreen) {
    println!("{}", "🎯 Generate a Prompt".bold());
    let Some(prompt) = &screen.prompt else {
        println!("  {}", "Type 'new' to begin.".cyan());
        return;
    };

    println!();
    for line in textwrap(prompt, WIDTH - 4).lines() {
        println!("  {}", line.bright_white().bold());
    }
    println!();
    answer_field("Your Response", &screen.draft, screen.editable);
    timer(&screen.timer);

    let mut controls = Vec::new();
    if screen.show_start {
        controls.push("start");
    }
    if screen.show_pause {
        controls.push("pause");
    }
    controls.push("stop");
    controls.push(if screen.can_submit { "submit" } else { "submit (needs text)" });
    println!("  {} {}", "Controls:".dimmed(), controls.join(" · ").dimmed());
}

fn cross_ex_screen(screen: &CrossExScreen) {
    println!("{}", "🔄 Cross-Examination".bold());
    match screen {
        CrossExScreen::Question {
            number,
            total,
            question,
            draft,
            editable,
            timer: view,
            can_submit,
        } => {
            println!("  {}", format!("Question {}/{}", number, total).bold());
            for line in textwrap(question, WIDTH - 4).lines() {
                println!("  {}", line.bright_white().bold());
            }
            println!();
            answer_field("Your Answer", draft, *editable);
            timer(view);
            let submit = if *can_submit { "submit" } else { "submit (needs text)" };
            println!(
                "  {} {}",
                "Controls:".dimmed(),
                format!("cross (restart) · {}", submit).dimmed()
            );
        }
        CrossExScreen::Complete { transcript } => {
            println!("  {}", "Cross-examination complete!".green().bold());
            println!("  {}", "Transcript".bold());
            for (i, qa) in transcript.iter().enumerate() {
                println!("  {} {}", format!("Q{}:", i + 1).bold(), qa.question);
                for line in textwrap(&qa.answer, WIDTH - 7).lines() {
                    println!("  {} {}", "A:".bold(), line);
                }
                println!("  {}", "─".repeat(WIDTH - 4).dimmed());
            }
            println!("  {} {}", "Controls:".dimmed(), "feedback · cross (restart)".dimmed());
        }
    }
}

fn feedback_screen(screen: &FeedbackScreen) {
    println!("{}", "📊 Your Feedback".bold());
    let FeedbackScreen::Ready { feedback, report } = screen else {
        println!(
            "  {}",
            "Complete a prompt or cross-ex to see feedback here.".cyan()
        );
        return;
    };

    for (name, score) in feedback.scores.entries() {
        println!(
            "  {:<10} {:>3}/100 {}",
            title_case(name).bold(),
            score,
            bar(f64::from(score) / 100.0)
        );
    }
    println!();
    println!("  {}", "Summary:".bold());
    for line in textwrap(&feedback.summary, WIDTH - 4).lines() {
        println!("  {}", line);
    }
    println!();
    println!("  {}", "🔧 Improvements".bold());
    for tip in &feedback.improvements {
        println!("  - {}", tip);
    }
    println!("  {}", "📚 Practice Suggestions".bold());
    for exercise in &feedback.suggested_practice {
        println!("  - {}", exercise);
    }
    println!();
    println!(
        "  {} {}",
        "📥 download [dir]".dimmed(),
        format!(
            "saves the report ({}, difficulty {}, {}s)",
            report.topic, report.difficulty, report.time_limit_sec
        )
        .dimmed()
    );
}

fn answer_field(label: &str, draft: &str, editable: bool) {
    let state = if editable {
        "editable: write/append".green()
    } else {
        "locked until the timer runs".yellow()
    };
    println!("  {} ({})", format!("{}:", label).bold(), state);
    if draft.is_empty() {
        println!("  {}", "│ (empty)".dimmed());
    } else {
        for line in draft.lines() {
            println!("  {} {}", "│".dimmed(), line);
        }
    }
}

fn timer(view: &TimerView) {
    match view.phase {
        TimerPhase::Running => {
            println!("  {} ⏰ {}s left", bar(view.progress), view.remaining_secs);
        }
        TimerPhase::Paused => {
            println!(
                "  {} ⏸️  Paused ({}s used)",
                bar(view.progress),
                view.used_secs
            );
        }
        TimerPhase::NotStarted => {}
    }
}

/// Countdown line printed between full renders.
pub fn countdown(view: &TimerView) {
    println!();
    println!("  {} ⏰ {}s left", bar(view.progress), view.remaining_secs);
}

pub fn topics(current: &PracticeSettings) {
    for name in available_topics() {
        if name == current.topic.name() {
            println!("  {} {}", "●".bright_blue(), name.bold());
        } else {
            println!("  {} {}", "○".dimmed(), name);
        }
    }
}

pub fn help() {
    let rows = [
        ("tab <prompts|crossing|feedback>, 1/2/3", "switch screen"),
        ("topics · topic <name>", "list or pick a topic (changing it resets)"),
        ("difficulty <1-5> · time <60|90|120>", "sidebar settings"),
        ("autostart <on|off>", "start the timer with each new prompt"),
        ("new", "new prompt for the current topic"),
        ("start · pause · stop", "timer controls (stop also resets)"),
        ("write <text> · append <text>", "edit the answer while the timer runs"),
        ("submit", "submit response / answer on the current screen"),
        ("cross", "start cross-examination"),
        ("feedback", "grade the finished cross-examination"),
        ("download [dir]", "save the feedback report as JSON"),
        ("reset", "reset everything"),
        ("status (or Enter) · quit", "redraw · leave"),
    ];
    for (command, description) in rows {
        println!("  {:<42} {}", command.bright_cyan(), description.dimmed());
    }
}

pub fn notice(message: &str) {
    println!("{}", message.green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Create a callback that prints practice events to the console.
pub fn console_callback() -> Box<dyn Fn(PracticeEvent) + Send + Sync> {
    Box::new(move |event| match event {
        PracticeEvent::PromptIssued { .. } => {}
        PracticeEvent::TimerStarted { limit_secs } => {
            println!("{}", format!("⏱️  Timer started ({}s)", limit_secs).dimmed());
        }
        PracticeEvent::TimerPaused { used_secs } => {
            println!("{}", format!("⏸️  Paused ({}s used)", used_secs).dimmed());
        }
        PracticeEvent::TimeUp => {
            println!();
            println!("{}", "Time's up! Submit your answer.".yellow().bold());
        }
        PracticeEvent::AnswerRecorded { number, .. } => {
            println!("{}", format!("Answer {}/5 recorded.", number).green());
        }
        PracticeEvent::CrossExComplete => {
            println!("{}", "Cross-examination complete!".green().bold());
        }
        PracticeEvent::Evaluating { source } => {
            let busy = match source {
                FeedbackSource::Response => "⏳ Analyzing your argument...",
                FeedbackSource::CrossEx => "🧠 Analyzing your cross-ex...",
            };
            println!("{}", busy.bright_magenta());
        }
        PracticeEvent::FeedbackReady { .. } => {}
        PracticeEvent::FeedbackWarning { message } => {
            eprintln!("{}", format!("⚠️  {}", message).red().bold());
        }
        PracticeEvent::Reset => {
            println!("{}", "🔄 Session reset.".dimmed());
        }
    })
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled).bright_blue(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Simple text wrapping function.
fn textwrap(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_line_len = 0;

    for word in text.split_whitespace() {
        if current_line_len + word.len() + 1 > width && current_line_len > 0 {
            result.push('\n');
            current_line_len = 0;
        }
        if current_line_len > 0 {
            result.push(' ');
            current_line_len += 1;
        }
        result.push_str(word);
        current_line_len += word.len();
    }

    result
}
