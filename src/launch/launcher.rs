// src/launch/launcher.rs

//! The launch sequence itself.

use nix::unistd::{Pid, getpgid, getpgrp};
use tracing::{debug, error, info, warn};

use crate::errors::{LaunchError, Result};
use crate::launch::markers::{MarkerWriter, Phase};
use crate::launch::spawner::{ProcessSpawner, classify_spawn_error};
use crate::launch::{ChildStatus, LaunchConfig, LaunchReport};

/// Spawns exactly one child per [`Launcher::launch`] call and waits for it.
#[derive(Debug)]
pub struct Launcher<S> {
    spawner: S,
    markers: MarkerWriter,
}

impl<S: ProcessSpawner> Launcher<S> {
    pub fn new(spawner: S, markers: MarkerWriter) -> Self {
        Self { spawner, markers }
    }

    /// Run the child described by `cfg` in a new process group and block
    /// until it terminates.
    ///
    /// - Fork failure: prints the failure marker once and returns
    ///   [`LaunchError::ForkFailed`]. No child markers are printed.
    /// - Exec failure: prints the child markers plus `Child Process end` and
    ///   returns [`LaunchError::ExecFailed`].
    /// - Otherwise returns a [`LaunchReport`]. The child's own exit status is
    ///   recorded there but does not make the launch fail.
    ///
    /// The wait has no timeout and cannot be cancelled.
    pub async fn launch(&mut self, cfg: &LaunchConfig) -> Result<LaunchReport> {
        let target = &cfg.target;
        let program = target.program_display();

        info!(
            program = %program,
            argv = ?target.args_display(),
            working_dir = ?cfg.working_dir,
            "starting launch"
        );
        self.markers.emit(Phase::ForkStart);

        let mut child = match self.spawner.spawn(target, cfg.working_dir.as_deref()) {
            Ok(child) => child,
            Err(err) => return Err(self.report_spawn_failure(&program, err)),
        };

        self.markers.emit(Phase::ChildStart);
        self.markers.emit(Phase::AfterSetpgrp);

        let child_pid = child.id().ok_or_else(|| {
            LaunchError::Other(anyhow::anyhow!("spawned child for '{program}' has no pid"))
        })?;
        let child_pgid = process_group_of(child_pid);
        let parent_pgid = getpgrp().as_raw();

        debug!(child_pid, ?child_pgid, parent_pgid, "child detached into its own process group");

        self.markers.emit(Phase::ParentStart);
        let status = child.wait().await.map_err(|e| {
            error!(child_pid, error = %e, "waiting for child failed");
            LaunchError::WaitFailed(e)
        })?;
        self.markers.emit(Phase::ParentEnd);

        let status = ChildStatus::from(status);
        info!(child_pid, %status, "child terminated");

        self.markers.emit(Phase::ForkEnd);

        Ok(LaunchReport {
            child_pid,
            child_pgid,
            parent_pgid,
            status,
        })
    }

    fn report_spawn_failure(&mut self, program: &str, err: std::io::Error) -> LaunchError {
        let err = classify_spawn_error(program, err);
        match &err {
            LaunchError::ExecFailed { source, .. } => {
                // The child existed and was detached; only the image swap failed.
                self.markers.emit(Phase::ChildStart);
                self.markers.emit(Phase::AfterSetpgrp);
                error!(program, error = %source, "child could not exec target program");
                self.markers.emit(Phase::ChildExecFailed);
            }
            other => {
                error!(program, error = %other, "could not create child process");
                self.markers.emit(Phase::ForkFailed);
            }
        }
        err
    }
}

fn process_group_of(pid: u32) -> Option<i32> {
    let raw = i32::try_from(pid).ok()?;
    match getpgid(Some(Pid::from_raw(raw))) {
        Ok(pgid) => Some(pgid.as_raw()),
        Err(e) => {
            warn!(pid, error = %e, "could not read child's process group");
            None
        }
    }
}
