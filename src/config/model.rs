// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::launch::ArgVector;
use crate::types::TargetPreset;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [launch]
/// target = "gdb"
/// markers = true
/// working_dir = "tests"
///
/// [target]
/// program = "/opt/gdb/bin/gdb"
/// args = ["gdb", "-x", "check.py", "input"]
/// ```
///
/// Every section is optional; an empty file means "built-in defaults".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub launch: LaunchSection,

    /// Replaces the preset's program and argv when present.
    #[serde(default)]
    pub target: Option<TargetSection>,
}

/// `[launch]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchSection {
    /// Built-in preset, `"bash"` (default) or `"gdb"`.
    #[serde(default)]
    pub target: TargetPreset,

    /// Print phase markers on stdout.
    #[serde(default = "default_markers")]
    pub markers: bool,

    /// Working directory for the child. Inherited from us if unset.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for LaunchSection {
    fn default() -> Self {
        Self {
            target: TargetPreset::default(),
            markers: default_markers(),
            working_dir: None,
        }
    }
}

fn default_markers() -> bool {
    true
}

/// `[target]` section: an explicit program and full argv.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    pub program: String,
    /// Full argv, argv[0] included.
    pub args: Vec<String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (or `Default`), so the
/// `target` override is always a well-formed [`ArgVector`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub launch: LaunchSection,
    pub target: Option<ArgVector>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(launch: LaunchSection, target: Option<ArgVector>) -> Self {
        Self { launch, target }
    }
}
