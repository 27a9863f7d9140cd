//! arcsh CLI entry point.
//!
//! Usage:
//!   arcsh               # Interactive shell, config from ./arcsh.toml
//!   arcsh <config.toml> # Interactive shell with an explicit config file

use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use arcsh::{Config, Session, open_vfs};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("arcsh {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some(path) if !path.starts_with('-') => run_shell(Path::new(path)),

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'arcsh --help' for usage.");
            Ok(ExitCode::FAILURE)
        }

        None => run_shell(Path::new("arcsh.toml")),
    }
}

fn run_shell(config_path: &Path) -> Result<ExitCode> {
    let config = Config::load_from(config_path)?;

    // a broken archive is the one fatal error; everything after this point
    // degrades to per-command result strings
    let vfs = open_vfs(&config.vfs, config.mode)?;

    let mut session = Session::new(&config, vfs);
    session.run()?;
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        r#"arcsh v{} — shell emulator over archive-backed virtual file systems

Usage:
  arcsh                 Interactive shell, config from ./arcsh.toml
  arcsh <config.toml>   Interactive shell with an explicit config file

Options:
  -h, --help            Show this help
  -V, --version         Show version

Config file (TOML):
  username              Prompt and audit log name (default: "user")
  log_file              Command log path (default: "arcsh.log")
  vfs                   Archive path: .zip, .tar, .tar.gz or .tgz (required)
  start_script          Optional script run before interactive input
  mode                  "archive" (read-only) or "tree" (default: "archive")
"#,
        env!("CARGO_PKG_VERSION")
    );
}
