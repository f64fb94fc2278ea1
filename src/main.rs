//! Entry point for **jelly-trace**.
//!
//! Replays a newline-delimited JSON gesture script from stdin through a
//! headless jelly control and prints one JSON snapshot per input to stdout.
//!
//! ```text
//! jelly-trace [--config <path>] < script.jsonl
//! ```
//!
//! Without `--config` the compiled-in defaults are used.  Set `RUST_LOG` to
//! see what the control is doing.

use jelly_pull::config::Config;
use jelly_pull::trace::run_trace;
use log::{error, info};
use std::io;
use std::path::PathBuf;

/// Value of `--config <path>` or `--config=<path>`, if given.
fn config_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn load_config() -> Result<Config, String> {
    match config_path() {
        Some(path) => {
            let cfg = Config::load(&path).map_err(|e| e.to_string())?;
            info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None => {
            info!("no --config given, using defaults");
            Ok(Config::default())
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_trace(&config, stdin.lock(), stdout.lock()) {
        error!("trace failed: {}", e);
        std::process::exit(1);
    }
}
