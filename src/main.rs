mod auth;
mod config;
mod db;
mod error;
mod logging;
mod models;
mod run;
mod ui;
mod validate;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (config, args) = config::Config::from_args(&args)?;

    // Logging is best-effort; the app still runs without a log file.
    let _logger = match logging::init_logging(&config.log_level, &config.log_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let mut db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;

    match args.len() {
        0 | 1 => run::as_tui(&mut db),
        _ => run::as_cli(&args, &mut db),
    }
}
