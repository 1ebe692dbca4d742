// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::TargetPreset;

/// Command-line arguments for `pgspawn`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pgspawn",
    version,
    about = "Run an interpreter or debugger in its own process group and wait for it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// If omitted, `Pgspawn.toml` in the current working directory is used
    /// when present; otherwise the built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Built-in launch target to use. Overrides `[launch].target`.
    #[arg(long, value_enum, value_name = "PRESET")]
    pub target: Option<TargetPreset>,

    /// Do not print phase markers on stdout.
    #[arg(long)]
    pub quiet_markers: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PGSPAWN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved program and argv, but don't spawn anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
