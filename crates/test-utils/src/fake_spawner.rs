use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use pgspawn::launch::{ArgVector, ProcessSpawner, TokioSpawner};
use tokio::process::Child;

/// A spawner whose every call fails with a fixed OS error.
///
/// With `libc`-style EAGAIN (11) this stands in for a fork that the kernel
/// refused (e.g. process limit reached).
#[derive(Debug, Clone)]
pub struct FailingSpawner {
    errno: i32,
    calls: Arc<Mutex<usize>>,
}

impl FailingSpawner {
    pub fn new(errno: i32) -> Self {
        Self {
            errno,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Fails like `fork(2)` does under resource exhaustion.
    pub fn fork_exhausted() -> Self {
        Self::new(nix::errno::Errno::EAGAIN as i32)
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ProcessSpawner for FailingSpawner {
    fn spawn(&mut self, _target: &ArgVector, _working_dir: Option<&Path>) -> io::Result<Child> {
        *self.calls.lock().unwrap() += 1;
        Err(io::Error::from_raw_os_error(self.errno))
    }
}

/// One recorded spawn request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

/// Records what it was asked to spawn, then spawns it for real.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    records: Arc<Mutex<Vec<SpawnRecord>>>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SpawnRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&mut self, target: &ArgVector, working_dir: Option<&Path>) -> io::Result<Child> {
        self.records.lock().unwrap().push(SpawnRecord {
            program: target.program_display(),
            args: target.args_display(),
            working_dir: working_dir.map(Path::to_path_buf),
        });
        TokioSpawner.spawn(target, working_dir)
    }
}

/// Spawns for real, then reaps the child itself before handing it over.
///
/// The returned `Child` refers to a pid that has already been waited for,
/// so the launcher's own `wait()` fails with ECHILD. The target should exit
/// promptly (e.g. `/bin/true`), since reaping blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReapedSpawner;

impl ProcessSpawner for ReapedSpawner {
    fn spawn(&mut self, target: &ArgVector, working_dir: Option<&Path>) -> io::Result<Child> {
        let child = TokioSpawner.spawn(target, working_dir)?;
        let pid = child
            .id()
            .ok_or_else(|| io::Error::other("spawned child has no pid"))?;
        let pid = i32::try_from(pid).map_err(io::Error::other)?;
        waitpid(Pid::from_raw(pid), None).map_err(io::Error::from)?;
        Ok(child)
    }
}
