// src/launch/argv.rs

//! Argument vectors handed to the child process.
//!
//! Every element is held as a C string, so it is NUL-terminated and cannot
//! carry an interior NUL. The built-in presets use `c"..."` literals, which
//! the compiler checks; overrides from config go through [`ArgVector::new`].

use std::borrow::Cow;
use std::ffi::{CStr, CString, OsStr};
use std::os::unix::ffi::OsStrExt;

use crate::errors::{LaunchError, Result};

/// A program path plus its full argv (argv[0] included), fixed at compile time.
///
/// Only obtainable through [`StaticTarget::new`], so the program and argv[0]
/// are always present and non-empty.
#[derive(Debug, Clone, Copy)]
pub struct StaticTarget {
    program: &'static CStr,
    argv: &'static [&'static CStr],
}

impl StaticTarget {
    /// `None` if the program path, argv, or argv[0] is empty.
    pub const fn new(program: &'static CStr, argv: &'static [&'static CStr]) -> Option<Self> {
        if program.is_empty() || argv.is_empty() || argv[0].is_empty() {
            return None;
        }
        Some(Self { program, argv })
    }

    pub const fn program(&self) -> &'static CStr {
        self.program
    }

    pub const fn argv(&self) -> &'static [&'static CStr] {
        self.argv
    }
}

// Evaluated in const context: a malformed preset fails the build.
const fn preset(target: Option<StaticTarget>) -> StaticTarget {
    match target {
        Some(target) => target,
        None => panic!("malformed built-in launch target"),
    }
}

/// Trace `nhat2.sh` under `bash -x`.
pub const BASH_SCRIPT: StaticTarget = preset(StaticTarget::new(
    c"/bin/bash",
    &[c"bash", c"-x", c"nhat2.sh"],
));

/// Run the eh_frame checker script inside gdb against `input`.
pub const GDB_SCRIPT: StaticTarget = preset(StaticTarget::new(
    c"/usr/bin/gdb",
    &[c"gdb", c"-x", c"eh_frame_check.py", c"input"],
));

/// Validated program + argv for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector {
    program: Cow<'static, CStr>,
    args: Vec<Cow<'static, CStr>>,
}

impl ArgVector {
    /// Build an argument vector from runtime strings.
    ///
    /// Fails if the program or argv[0] is empty, if `args` is empty, or if any
    /// element contains a NUL byte.
    pub fn new<S: AsRef<str>>(program: &str, args: &[S]) -> Result<Self> {
        if program.is_empty() {
            return Err(LaunchError::ConfigError(
                "target program must not be empty".to_string(),
            ));
        }
        let Some(first) = args.first() else {
            return Err(LaunchError::ConfigError(
                "target args must contain at least argv[0]".to_string(),
            ));
        };
        if first.as_ref().is_empty() {
            return Err(LaunchError::ConfigError(
                "argv[0] must not be empty".to_string(),
            ));
        }

        let program = to_cstring("program", program)?;
        let args = args
            .iter()
            .enumerate()
            .map(|(i, a)| to_cstring(&format!("args[{i}]"), a.as_ref()).map(Cow::Owned))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            program: Cow::Owned(program),
            args,
        })
    }

    /// Full argv, argv[0] first.
    pub fn args(&self) -> impl Iterator<Item = &CStr> {
        self.args.iter().map(|a| &**a)
    }

    pub fn program_os(&self) -> &OsStr {
        OsStr::from_bytes(self.program.to_bytes())
    }

    /// argv[0] as passed to the child (may differ from the program path).
    pub fn arg0_os(&self) -> &OsStr {
        OsStr::from_bytes(self.args[0].to_bytes())
    }

    /// argv[1..].
    pub fn rest_os(&self) -> impl Iterator<Item = &OsStr> {
        self.args[1..].iter().map(|a| OsStr::from_bytes(a.to_bytes()))
    }

    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    pub fn args_display(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl From<StaticTarget> for ArgVector {
    fn from(target: StaticTarget) -> Self {
        Self {
            program: Cow::Borrowed(target.program),
            args: target.argv.iter().map(|a| Cow::Borrowed(*a)).collect(),
        }
    }
}

fn to_cstring(what: &str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|e| {
        LaunchError::ConfigError(format!(
            "target {what} contains a NUL byte at position {}",
            e.nul_position()
        ))
    })
}
