// src/launch/spawner.rs

//! Pluggable process spawner.
//!
//! The launcher talks to a `ProcessSpawner` instead of building commands
//! itself. Production code uses [`TokioSpawner`]; tests can swap in a spawner
//! that fails on demand (e.g. to simulate a fork failure) or that records
//! what it was asked to run.

use std::io;
use std::path::Path;

use nix::errno::Errno;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::errors::LaunchError;
use crate::launch::argv::ArgVector;

/// Trait abstracting how the child process is created.
///
/// Implementations must place the child in a new process group whose id is
/// the child's pid.
pub trait ProcessSpawner: Send {
    fn spawn(&mut self, target: &ArgVector, working_dir: Option<&Path>) -> io::Result<Child>;
}

/// Real spawner: `tokio::process::Command` with `process_group(0)`.
///
/// The group is set between fork and exec, so there is no window in which
/// the child runs in the parent's group. stdio is inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl ProcessSpawner for TokioSpawner {
    fn spawn(&mut self, target: &ArgVector, working_dir: Option<&Path>) -> io::Result<Child> {
        let mut cmd = Command::new(target.program_os());
        cmd.arg0(target.arg0_os())
            .args(target.rest_os())
            .process_group(0);

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            program = %target.program_display(),
            argv = ?target.args_display(),
            working_dir = ?working_dir,
            "spawning child in new process group"
        );

        cmd.spawn()
    }
}

/// Sort a spawn error into "could not fork" vs "forked but could not exec".
///
/// `Command::spawn` reports both through one `io::Error`, so the split is by
/// errno. Errnos only `execve(2)` (or the `chdir` before it) produces count
/// as exec failures. ENOMEM, EMFILE, ENFILE and EFAULT can come from either
/// step; they are reported as fork failures (exit 1), as are errors with no
/// errno at all.
pub fn classify_spawn_error(program: &str, err: io::Error) -> LaunchError {
    match err.raw_os_error().map(Errno::from_raw) {
        Some(errno) if is_exec_errno(errno) => LaunchError::ExecFailed {
            program: program.to_string(),
            source: err,
        },
        _ => LaunchError::ForkFailed(err),
    }
}

fn is_exec_errno(errno: Errno) -> bool {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    if errno == Errno::ELIBBAD {
        return true;
    }

    matches!(
        errno,
        Errno::ENOENT
            | Errno::EACCES
            | Errno::ENOEXEC
            | Errno::ENOTDIR
            | Errno::EISDIR
            | Errno::ELOOP
            | Errno::ENAMETOOLONG
            | Errno::ETXTBSY
            | Errno::E2BIG
            | Errno::EPERM
            | Errno::EIO
    )
}
