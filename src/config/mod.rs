// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - [`model`] defines the raw TOML shape and the validated `ConfigFile`.
//! - [`validate`] turns a `RawConfigFile` into a `ConfigFile`.
//! - [`loader`] reads files from disk and picks the default location.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{ConfigFile, LaunchSection, RawConfigFile, TargetSection};
