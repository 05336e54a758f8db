//! Terminal host for the flag quiz.
//!
//! Loads the dataset, keeps the pool and recent history for a session,
//! persists progress to a JSON file, and exposes route generation as a batch
//! command.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod session;
pub mod store;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

pub use error::{AppError, Result};
pub use session::{Question, QuizSession, Response};
pub use store::{HighScores, JsonFileStore};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(&cli);
    tracing::debug!(?config, "resolved configuration");

    commands::dispatch(cli.command, &config)?;
    Ok(())
}
