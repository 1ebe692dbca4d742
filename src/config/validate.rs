// src/config/validate.rs

use crate::config::model::{ConfigFile, LaunchSection, RawConfigFile, TargetSection};
use crate::errors::{LaunchError, Result};
use crate::launch::ArgVector;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LaunchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_launch_section(&raw.launch)?;
        let target = raw.target.as_ref().map(validate_target_section).transpose()?;
        Ok(ConfigFile::new_unchecked(raw.launch, target))
    }
}

fn validate_launch_section(launch: &LaunchSection) -> Result<()> {
    // `target` is strongly typed and checked during deserialization.
    if let Some(dir) = &launch.working_dir {
        if dir.as_os_str().is_empty() {
            return Err(LaunchError::ConfigError(
                "[launch].working_dir must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_target_section(target: &TargetSection) -> Result<ArgVector> {
    ArgVector::new(&target.program, target.args.as_slice()).map_err(|e| match e {
        LaunchError::ConfigError(msg) => LaunchError::ConfigError(format!("[target]: {msg}")),
        other => other,
    })
}
