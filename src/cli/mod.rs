//! CLI module for apexscan
//!
//! ## Commands
//!
//! - `check <paths>` - Parse every source file and lint for DML inside loops
//! - `outline <file>` - Print the declarations and members of one file
//! - `stats <paths>` - Count tree nodes by kind, optionally as JSON
//! - `fmt <paths>` - Print sources in canonical layout, or list the files that differ from it
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::ScanConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// User-facing error plus the exit code to leave with.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Already formatted for display; empty when diagnostics were printed earlier
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parse Apex sources and report on their structure
#[derive(Parser, Debug)]
#[command(name = "apexscan")]
#[command(version = VERSION)]
#[command(about = "Parse Apex sources and report on their structure", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// File selection shared by the commands that scan directories.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Accepted file extension (repeatable; default: cls, trigger)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Stop after this many files
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,
}

impl ScanArgs {
    pub fn config(&self) -> ScanConfig {
        let mut config = ScanConfig::new().with_max_files(self.max_files);
        if !self.extensions.is_empty() {
            config = config.with_extensions(self.extensions.iter().map(|e| e.trim_start_matches('.')));
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse files and flag DML statements inside loops
    Check {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print an outline of one file
    Outline {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Count syntax tree nodes by kind
    Stats {
        #[command(flatten)]
        scan: ScanArgs,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Do not descend into method, constructor and accessor bodies
        #[arg(long)]
        skip_bodies: bool,
    },

    /// Print files in canonical layout (comments are not kept)
    Fmt {
        #[command(flatten)]
        scan: ScanArgs,
        /// List files that would change instead of printing them
        #[arg(long)]
        check: bool,
        /// Show a line diff for files that would change
        #[arg(long, conflicts_with = "check")]
        diff: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check { scan } => commands::check(&scan.paths, &scan.config()),
        Command::Outline { file } => commands::outline(&file),
        Command::Stats {
            scan,
            json,
            skip_bodies,
        } => commands::stats(&scan.paths, &scan.config().with_skip_method_bodies(skip_bodies), json),
        Command::Fmt { scan, check, diff } => commands::format_files(&scan.paths, &scan.config(), check, diff),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_flags_parse() {
        let cli = Cli::try_parse_from(["apexscan", "stats", "src", "--json", "--skip-bodies", "--ext", ".cls"]).unwrap();
        let Command::Stats { scan, json, skip_bodies } = cli.command else {
            panic!("expected stats");
        };
        assert!(json);
        assert!(skip_bodies);
        assert_eq!(scan.paths, vec![PathBuf::from("src")]);
        assert_eq!(scan.config().extensions, vec!["cls".to_string()]);
    }

    #[test]
    fn test_check_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["apexscan", "check"]).unwrap();
        let Command::Check { scan } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(scan.paths, vec![PathBuf::from(".")]);
        assert_eq!(scan.config(), ScanConfig::default());
    }

    #[test]
    fn test_fmt_flags_parse() {
        let cli = Cli::try_parse_from(["apexscan", "fmt", "--check", "a.cls"]).unwrap();
        let Command::Fmt { scan, check, diff } = cli.command else {
            panic!("expected fmt");
        };
        assert!(check);
        assert!(!diff);
        assert_eq!(scan.paths, vec![PathBuf::from("a.cls")]);
        assert!(Cli::try_parse_from(["apexscan", "fmt", "--check", "--diff"]).is_err());
    }

    #[test]
    fn test_outline_requires_file() {
        assert!(Cli::try_parse_from(["apexscan", "outline"]).is_err());
    }
}
