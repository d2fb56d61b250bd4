//! Interactive loop: one command or one timer refresh at a time.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use debator_core::report::REPORT_MIME;
use debator_core::{DebatorError, PracticeOrchestrator, Screen, TimerTick, TimerView};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{self, Command};
use crate::render;

/// Delay between refreshes while the timer runs.
const REFRESH: Duration = Duration::from_secs(1);

/// Remaining-seconds marks worth announcing between full renders.
fn is_milestone(remaining_secs: u32) -> bool {
    remaining_secs > 0 && (remaining_secs % 15 == 0 || remaining_secs <= 5)
}

struct Shell<'a> {
    orchestrator: &'a mut PracticeOrchestrator,
    screen: Screen,
    out_dir: PathBuf,
    last_announced: Option<u32>,
}

pub async fn run(orchestrator: &mut PracticeOrchestrator, out_dir: &Path) -> io::Result<()> {
    let mut shell = Shell {
        orchestrator,
        screen: Screen::Prompts,
        out_dir: out_dir.to_path_buf(),
        last_announced: None,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render::screen(shell.orchestrator, shell.screen);
    render::input_prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = shell.apply(command).await {
                            render::error(&e.to_string());
                        }
                    }
                    Err(message) => render::error(&message),
                }
                render::screen(shell.orchestrator, shell.screen);
                render::input_prompt();
            }
            _ = tokio::time::sleep(REFRESH), if shell.orchestrator.timer_running() => {
                match shell.orchestrator.tick() {
                    TimerTick::Running(view) => shell.announce(&view),
                    TimerTick::Expired => render::input_prompt(),
                    TimerTick::Idle => {}
                }
            }
        }
    }

    println!();
    Ok(())
}

impl Shell<'_> {
    async fn apply(&mut self, command: Command) -> Result<(), DebatorError> {
        match command {
            Command::Help => render::help(),
            Command::Status => {}
            Command::Tab(screen) => self.screen = screen,
            Command::Topics => render::topics(self.orchestrator.settings()),
            Command::Topic(topic) => {
                if self.orchestrator.select_topic(topic) {
                    render::notice(&format!("Topic set to {}.", topic));
                }
            }
            Command::Difficulty(difficulty) => self.orchestrator.set_difficulty(difficulty),
            Command::TimeLimit(limit) => self.orchestrator.set_time_limit(limit),
            Command::AutoStart(on) => self.orchestrator.set_auto_start(on),
            Command::NewPrompt => {
                self.screen = Screen::Prompts;
                self.last_announced = None;
                self.orchestrator.new_prompt();
            }
            Command::Start => {
                self.last_announced = None;
                self.orchestrator.start_timer()?;
            }
            Command::Pause => self.orchestrator.pause_timer()?,
            Command::Stop => self.orchestrator.stop_and_reset(),
            Command::Reset => self.orchestrator.reset_all(),
            Command::Write(text) => match self.screen {
                Screen::Prompts => self.orchestrator.write_response(&text)?,
                Screen::Crossing => self.orchestrator.write_cross_answer(&text)?,
                Screen::Feedback => return Err(DebatorError::Unavailable("write")),
            },
            Command::Append(line) => match self.screen {
                Screen::Prompts => self.orchestrator.append_response(&line)?,
                Screen::Crossing => self.orchestrator.append_cross_answer(&line)?,
                Screen::Feedback => return Err(DebatorError::Unavailable("append")),
            },
            Command::Submit => match self.screen {
                Screen::Prompts => {
                    self.orchestrator.submit_response().await?;
                    render::notice("Submitted! Check the Feedback tab.");
                }
                Screen::Crossing => {
                    self.last_announced = None;
                    self.orchestrator.submit_answer()?;
                }
                Screen::Feedback => return Err(DebatorError::Unavailable("submit")),
            },
            Command::CrossEx => {
                self.screen = Screen::Crossing;
                self.last_announced = None;
                self.orchestrator.start_cross_ex();
            }
            Command::GetFeedback => {
                self.orchestrator.cross_ex_feedback().await?;
                render::notice("Feedback generated! View in Feedback tab.");
            }
            Command::Download(dir) => {
                let report = self
                    .orchestrator
                    .report()
                    .ok_or(DebatorError::Unavailable("download"))?;
                let dir = dir.unwrap_or_else(|| self.out_dir.clone());
                let path = report.write_to(&dir)?;
                render::notice(&format!("📥 Saved {} ({})", path.display(), REPORT_MIME));
            }
            Command::Quit => {}
        }
        Ok(())
    }

    fn announce(&mut self, view: &TimerView) {
        if !is_milestone(view.remaining_secs) || self.last_announced == Some(view.remaining_secs) {
            return;
        }
        self.last_announced = Some(view.remaining_secs);
        render::countdown(view);
        render::input_prompt();
    }
}
