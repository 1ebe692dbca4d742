use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::launch::argv::{ArgVector, BASH_SCRIPT, GDB_SCRIPT};

/// Built-in launch targets.
///
/// - `Bash`: trace a shell script with `bash -x` (default).
/// - `Gdb`: run a gdb Python script against the `input` program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetPreset {
    Bash,
    Gdb,
}

impl TargetPreset {
    /// The compile-time argument vector behind this preset.
    pub fn arg_vector(self) -> ArgVector {
        match self {
            TargetPreset::Bash => ArgVector::from(BASH_SCRIPT),
            TargetPreset::Gdb => ArgVector::from(GDB_SCRIPT),
        }
    }
}

impl Default for TargetPreset {
    fn default() -> Self {
        TargetPreset::Bash
    }
}

impl fmt::Display for TargetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPreset::Bash => f.write_str("bash"),
            TargetPreset::Gdb => f.write_str("gdb"),
        }
    }
}

impl FromStr for TargetPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bash" => Ok(TargetPreset::Bash),
            "gdb" => Ok(TargetPreset::Gdb),
            other => Err(format!(
                "invalid target preset: {other} (expected \"bash\" or \"gdb\")"
            )),
        }
    }
}
