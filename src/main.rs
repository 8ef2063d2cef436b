use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use clap::Parser;
use shiplist::cli::commands::Cli;
use shiplist::io::config_io::{config_path, read_config_or_default};
use shiplist::io::storage::data_dir;
use shiplist::telemetry::LogReporter;
use shiplist::tui::{self, RunOptions};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging is opt-in via SHIPLIST_LOG and goes to a file, never the terminal
/// the TUI is drawing on.
fn init_tracing() {
    let Some(filter) = std::env::var("SHIPLIST_LOG").ok().and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 4096 {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    }) else {
        return;
    };

    let dir = data_dir();
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("shiplist.log"))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let config = read_config_or_default(&config_file);

    let options = RunOptions {
        config,
        store_path: cli.store,
        reporter: Box::new(LogReporter),
    };
    if let Err(e) = tui::run(options) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
