mod app;
mod config;
mod error;
mod forms;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::error::{AppError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    tracing::info!(base_url = %config.base_url, timezone = %config.timezone, "starting cuzdan");

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cuzdan={level},store={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
