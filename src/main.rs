mod app;
mod food;
mod game;
mod grid;
mod snake;
mod term;
mod timer;

use std::fs::File;

use anyhow::{Context, Result};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

// The terminal belongs to the game screen, so logs go to a file.
const LOG_FILE: &str = "snake.log";

fn main() -> Result<()> {
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(LOG_FILE).context("Error creating log file")?,
    )
    .context("Error initializing logger")?;

    info!("Starting the game...");

    let mut app = app::App::new()?;
    let result = app.run();

    info!("Game ended");
    result
}
