//! `aegis-cli` – command line front end for the AEGIS safety monitor.
//!
//! 1. Loads `~/.aegis/config.toml` (defaults when absent) and applies
//!    `AEGIS_*` environment overrides.
//! 2. Initialises structured logging.
//! 3. Parses the command line and runs one safety check, the verification
//!    audit, or a housekeeping command.
//!
//! Exit codes: `0` nominal, `1` negative verdict or failed audit, `2` usage
//! error or rejected input.

mod commands;
mod config;

use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;

use crate::config::LogFormat;

fn main() -> ExitCode {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            let mut cfg = config::Config::default();
            config::apply_env_overrides(&mut cfg);
            cfg
        }
    };

    init_logging(cfg.log_format);
    debug!(?cfg, "configuration loaded");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match commands::parse(args.as_slice()) {
        Ok(command) => commands::execute(command, &cfg),
        Err(e) => {
            println!("{}: {}", "Usage error".red(), e);
            commands::print_help();
            ExitCode::from(2)
        }
    }
}

/// Initialise tracing-subscriber using `RUST_LOG` (defaults to "warn" so
/// check output stays readable).  Logs go to stderr; verdicts go to stdout.
fn init_logging(format: LogFormat) {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .init(),
    }
}
