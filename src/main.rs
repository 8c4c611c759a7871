mod config;
mod db;
mod engine;
mod error;
mod feed;
mod logging;
mod models;
mod progress;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_dirs()?;
    if let Err(e) = logging::init_tracing(&config) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let mut db = db::Database::open(&config.db_path)?;
    tracing::debug!(db = %config.db_path.display(), currency = %config.currency, "starting");

    match args.len() {
        1 => run::as_tui(&mut db, &config),
        2.. => run::as_cli(&args, &mut db, &config),
        _ => {
            eprintln!("Usage: breakdown [command]");
            Ok(())
        }
    }
}
