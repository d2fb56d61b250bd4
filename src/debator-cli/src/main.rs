//! Intense Debator CLI - timed debate practice
//!
//! Presents debate prompts and cross-examination questions under a countdown
//! and grades the answers with an OpenAI-compatible model.

mod command;
mod render;
mod shell;

use clap::Parser;
use colored::Colorize;
use debator_core::{
    Config, Difficulty, FeedbackClient, OpenAiGrader, PracticeOrchestrator, PracticeSettings,
    TimeLimit, Topic,
};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "intense-debator",
    version,
    about = "Intense Debator - timed debate practice with AI feedback",
    long_about = "Practice timed debate responses and cross-examinations in the terminal, \
                  then get rubric scores and tips from an OpenAI-compatible model."
)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Topic category (e.g. "Ethics", "Current Trends")
    #[arg(short, long, value_name = "TOPIC", value_parser = command::parse_topic)]
    topic: Option<Topic>,

    /// Difficulty from 1 to 5
    #[arg(short, long, value_name = "LEVEL", value_parser = command::parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Seconds per answer: 60, 90 or 120
    #[arg(long, value_name = "SECONDS", value_parser = command::parse_time_limit)]
    time_limit: Option<TimeLimit>,

    /// Do not start the timer automatically with each new prompt
    #[arg(long)]
    no_auto_start: bool,

    /// Grading model name (overrides the config file)
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    /// Directory for downloaded feedback reports
    #[arg(long, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Ok(api_base) = env::var("OPENAI_API_BASE").or_else(|_| env::var("OPENAI_BASE_URL")) {
        config.feedback.api_base = api_base;
    }
    if let Some(model) = cli.model {
        config.feedback.model = model;
    }

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        eprintln!(
            "{}",
            "Warning: OPENAI_API_KEY not set. Feedback will use sample data.".yellow()
        );
        tracing::warn!("OPENAI_API_KEY not set; every grading request will fall back");
        String::new()
    });

    let mut settings = PracticeSettings::from(&config.practice);
    if let Some(topic) = cli.topic {
        settings.topic = topic;
    }
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(time_limit) = cli.time_limit {
        settings.time_limit = time_limit;
    }
    if cli.no_auto_start {
        settings.auto_start = false;
    }

    let grader = OpenAiGrader::new(&config.feedback, &api_key)?;
    let client = FeedbackClient::new(Box::new(grader), config.prompts.clone())
        .with_temperature(config.feedback.temperature);

    tracing::debug!(
        model = %config.feedback.model,
        api_base = %config.feedback.api_base,
        "grading backend configured"
    );

    let mut orchestrator =
        PracticeOrchestrator::new(settings, client).with_callback(render::console_callback());

    render::header();
    shell::run(&mut orchestrator, &cli.out_dir).await?;

    println!("{}", "Good debating. Goodbye!".bright_green().bold());
    Ok(())
}
