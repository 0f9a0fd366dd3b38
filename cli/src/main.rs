//! Archon CLI - Centrally governed tooling configuration for AI coding agents

use std::process::ExitCode;

use clap::Parser;

use archon_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
