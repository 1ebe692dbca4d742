#![allow(dead_code)]

use std::path::PathBuf;

use pgspawn::config::{ConfigFile, LaunchSection, RawConfigFile, TargetSection};
use pgspawn::types::TargetPreset;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                launch: LaunchSection::default(),
                target: None,
            },
        }
    }

    pub fn preset(mut self, preset: TargetPreset) -> Self {
        self.config.launch.target = preset;
        self
    }

    pub fn markers(mut self, val: bool) -> Self {
        self.config.launch.markers = val;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.launch.working_dir = Some(dir.into());
        self
    }

    /// Set a `[target]` override; `args` is the full argv.
    pub fn target(mut self, program: &str, args: &[&str]) -> Self {
        self.config.target = Some(TargetSection {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    /// Run a shell snippet through `/bin/sh -c`.
    pub fn shell(self, script: &str) -> Self {
        self.target("/bin/sh", &["sh", "-c", script])
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
