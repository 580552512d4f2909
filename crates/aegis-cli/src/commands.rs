//! Command parsing and execution for the `aegis` binary.
//!
//! Supported commands:
//!   corridor x y z vx vy vz       – corridor check on one state vector
//!   vote s1 s2 s3 [--tolerance T] – TMR vote; `null`, `none` or `-` marks
//!                                   an offline sensor
//!   audit [--json]                – run the built-in verification scenarios
//!   schema                        – print the audit report JSON schema
//!   init                          – write a default `~/.aegis/config.toml`
//!   help                          – show this list

use std::path::Path;
use std::process::ExitCode;

use aegis_kernel::{run_audit, sensor_vote_tmr, verify_trajectory_safety};
use aegis_types::{AegisError, AuditReport, CheckOutcome, CorridorStatus, VoteStatus};
use colored::Colorize;
use schemars::schema_for;
use tracing::error;

use crate::config::{self, Config};

const EXIT_OK: u8 = 0;
/// Exit code for negative verdicts and failed audits.
const EXIT_NEGATIVE: u8 = 1;
/// Exit code for usage errors and rejected input.
const EXIT_USAGE: u8 = 2;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Corridor(Vec<f64>),
    Vote {
        readings: [Option<f64>; 3],
        tolerance: Option<f64>,
    },
    Audit {
        json: bool,
    },
    Schema,
    Init,
    Help,
}

/// Parse the arguments that follow the program name.
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, String> {
    let Some((head, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

    match head.as_ref() {
        "corridor" => {
            // Length is checked by the kernel so the dimension fault is
            // reported the same way for every caller.
            let state = rest
                .iter()
                .map(|s| parse_number(s))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Corridor(state))
        }
        "vote" => parse_vote(&rest),
        "audit" => match rest.as_slice() {
            [] => Ok(Command::Audit { json: false }),
            ["--json"] => Ok(Command::Audit { json: true }),
            other => Err(format!("unexpected arguments to audit: {}", other.join(" "))),
        },
        "schema" => Ok(Command::Schema),
        "init" => Ok(Command::Init),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn parse_vote(args: &[&str]) -> Result<Command, String> {
    let mut positional = Vec::new();
    let mut tolerance = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--tolerance" {
            let value = iter.next().ok_or("--tolerance needs a value")?;
            tolerance = Some(parse_number(value)?);
        } else {
            positional.push(parse_reading(arg)?);
        }
    }
    let readings: [Option<f64>; 3] = positional
        .try_into()
        .map_err(|v: Vec<_>| format!("vote needs exactly 3 readings, got {}", v.len()))?;
    Ok(Command::Vote {
        readings,
        tolerance,
    })
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("'{s}' is not a number"))
}

fn parse_reading(s: &str) -> Result<Option<f64>, String> {
    match s.to_ascii_lowercase().as_str() {
        "null" | "none" | "-" => Ok(None),
        _ => parse_number(s).map(Some),
    }
}

/// Run `command` and return the process exit code.
pub fn execute(command: Command, cfg: &Config) -> ExitCode {
    ExitCode::from(run(command, cfg))
}

fn run(command: Command, cfg: &Config) -> u8 {
    match command {
        Command::Corridor(state) => cmd_corridor(&state),
        Command::Vote {
            readings,
            tolerance,
        } => cmd_vote(readings, tolerance.unwrap_or(cfg.tolerance)),
        Command::Audit { json } => cmd_audit(cfg.tolerance, json),
        Command::Schema => cmd_schema(),
        Command::Init => cmd_init(&config::config_path()),
        Command::Help => {
            print_help();
            EXIT_OK
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn cmd_corridor(state: &[f64]) -> u8 {
    match verify_trajectory_safety(state) {
        Ok(verdict) => {
            let label = match verdict.status {
                CorridorStatus::Nominal => verdict.status.as_str().green().bold(),
                CorridorStatus::CriticalViolationCorridorExit => {
                    verdict.status.as_str().red().bold()
                }
            };
            println!("  C = {:.5}  {}", verdict.jacobi, label);
            if verdict.is_nominal() {
                EXIT_OK
            } else {
                EXIT_NEGATIVE
            }
        }
        Err(e) => report_fault(&e),
    }
}

fn cmd_vote(readings: [Option<f64>; 3], tolerance: f64) -> u8 {
    let [s1, s2, s3] = readings;
    match sensor_vote_tmr(s1, s2, s3, tolerance) {
        Ok(verdict) => match (verdict.status, verdict.value) {
            (VoteStatus::VoteSuccess, Some(value)) => {
                println!("  value = {}  {}", value, verdict.status.as_str().green().bold());
                EXIT_OK
            }
            (status, _) => {
                println!("  value = -  {}", status.as_str().red().bold());
                EXIT_NEGATIVE
            }
        },
        Err(e) => report_fault(&e),
    }
}

fn cmd_audit(tolerance: f64, json: bool) -> u8 {
    let report = run_audit(tolerance);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                error!(error = %e, "failed to serialize audit report");
                return EXIT_USAGE;
            }
        }
    } else {
        print_report(&report);
    }

    if report.all_passed() {
        EXIT_OK
    } else {
        EXIT_NEGATIVE
    }
}

fn cmd_schema() -> u8 {
    match serde_json::to_string_pretty(&schema_for!(AuditReport)) {
        Ok(s) => {
            println!("{s}");
            EXIT_OK
        }
        Err(e) => {
            error!(error = %e, "failed to serialize schema");
            EXIT_USAGE
        }
    }
}

/// Write the built-in defaults to `path` unless a file is already there.
/// `AEGIS_*` overrides are not persisted.
fn cmd_init(path: &Path) -> u8 {
    if path.exists() {
        println!("  Config already present at {}", path.display().to_string().bold());
        return EXIT_OK;
    }
    match config::save_to(&Config::default(), path) {
        Ok(()) => {
            println!(
                "  {} Config saved to {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
            EXIT_OK
        }
        Err(e) => {
            println!("{}: {}", "Error saving config".red(), e);
            EXIT_USAGE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output helpers
// ─────────────────────────────────────────────────────────────────────────────

fn report_fault(err: &AegisError) -> u8 {
    error!(kind = err.kind(), error = %err, "safety check rejected input");
    println!("  {} {}", err.kind().red().bold(), err);
    EXIT_USAGE
}

fn print_report(report: &AuditReport) {
    println!("{}", "--- AEGIS SYSTEM AUDIT ---".bold().cyan());
    println!("  run {} at {}", report.id, report.timestamp.to_rfc3339());
    for check in &report.checks {
        let mark = if check.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        let detail = match &check.outcome {
            CheckOutcome::Corridor(v) => format!("C = {:.5} {}", v.jacobi, v.status),
            CheckOutcome::Vote(v) => match v.value {
                Some(value) => format!("value = {value} {}", v.status),
                None => format!("value = - {}", v.status),
            },
            CheckOutcome::Fault { kind, message } => format!("{kind}: {message}"),
        };
        println!("  [{mark}] {:<28} {}", check.name, detail.dimmed());
    }
    if report.all_passed() {
        println!("{}", "--- ALL SAFETY TESTS NOMINAL ---".green().bold());
    } else {
        println!("{}", "--- SAFETY AUDIT FAILED ---".red().bold());
    }
}

pub fn print_help() {
    println!("{}", "Usage: aegis <command> [args]".bold());
    println!("  {}  x y z vx vy vz         corridor check", "corridor".cyan());
    println!("  {}      s1 s2 s3 [--tolerance T]  TMR vote (null = offline)", "vote".cyan());
    println!("  {}     [--json]                 run verification scenarios", "audit".cyan());
    println!("  {}                              print audit report schema", "schema".cyan());
    println!("  {}                                write default config", "init".cyan());
    println!("  {}                                show this list", "help".cyan());
}
