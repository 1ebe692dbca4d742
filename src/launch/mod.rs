// src/launch/mod.rs

//! Process launching.
//!
//! One launch is a linear sequence: spawn the child in a fresh process
//! group, wait for it, report. The pieces:
//!
//! - [`argv`] holds the compile-time target presets and the validated
//!   [`ArgVector`](argv::ArgVector) type.
//! - [`spawner`] provides the `ProcessSpawner` trait, the real
//!   `TokioSpawner`, and spawn-error classification.
//! - [`markers`] writes the phase marker lines on stdout.
//! - [`launcher`] drives the sequence and produces a [`LaunchReport`].

pub mod argv;
pub mod launcher;
pub mod markers;
pub mod spawner;

use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;

use nix::sys::signal::Signal;

use crate::config::ConfigFile;
use crate::types::TargetPreset;

pub use argv::ArgVector;
pub use launcher::Launcher;
pub use markers::{MarkerWriter, Phase};
pub use spawner::{ProcessSpawner, TokioSpawner, classify_spawn_error};

/// Everything one launch needs, after CLI and config have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub target: ArgVector,
    pub working_dir: Option<PathBuf>,
    pub markers: bool,
}

impl LaunchConfig {
    /// Merge CLI overrides into a loaded config.
    ///
    /// Target precedence: `--target` preset, then the config's `[target]`
    /// override, then the config's `[launch].target` preset.
    pub fn resolve(cfg: &ConfigFile, cli_target: Option<TargetPreset>, quiet_markers: bool) -> Self {
        let target = match (cli_target, &cfg.target) {
            (Some(preset), _) => preset.arg_vector(),
            (None, Some(custom)) => custom.clone(),
            (None, None) => cfg.launch.target.arg_vector(),
        };

        Self {
            target,
            working_dir: cfg.launch.working_dir.clone(),
            markers: cfg.launch.markers && !quiet_markers,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            target: TargetPreset::default().arg_vector(),
            working_dir: None,
            markers: true,
        }
    }
}

/// How the child terminated. Logged, never turned into our exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
    Unknown,
}

impl From<ExitStatus> for ChildStatus {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            ChildStatus::Exited(code)
        } else if let Some(signo) = status.signal() {
            ChildStatus::Signaled(signo)
        } else {
            ChildStatus::Unknown
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exited with code {code}"),
            ChildStatus::Signaled(signo) => match Signal::try_from(*signo) {
                Ok(sig) => write!(f, "killed by {sig} ({signo})"),
                Err(_) => write!(f, "killed by signal {signo}"),
            },
            ChildStatus::Unknown => f.write_str("terminated (unknown status)"),
        }
    }
}

/// Result of a launch whose fork succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub child_pid: u32,
    /// Process group of the child as seen right after spawning. `None` if
    /// the lookup failed.
    pub child_pgid: Option<i32>,
    pub parent_pgid: i32,
    pub status: ChildStatus,
}
