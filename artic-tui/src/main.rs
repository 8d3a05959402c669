mod app;
mod config;
mod input;
mod paths;
mod render;
mod terminal;
mod text;

use std::fs::File;
use std::sync::Arc;

use log::{error, info};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use crate::app::App;
use crate::config::Config;
use crate::terminal::TerminalGuard;

/// Sends log output to `latest.log` in the cache directory, or to the
/// working directory when no cache directory is available.
fn init_logging(level: LevelFilter) {
    let path = match paths::log_file() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            path
        }
        None => "artic-tui.log".into(),
    };

    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, LogConfig::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file '{}': {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() {
    paths::rotate_logs();

    let config = match Config::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    init_logging(config.level_filter().unwrap_or(LevelFilter::Info));
    info!("Starting with {:?}", config);

    let client = match config.client_builder().build() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build client: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let result = match TerminalGuard::new() {
        Ok(mut terminal) => App::new(Arc::new(client)).run(&mut terminal).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
