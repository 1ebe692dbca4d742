// tests/launcher.rs
mod common;
use crate::common::{init_tracing, with_timeout};

use pgspawn::errors::{EXIT_EXEC_FAILED, EXIT_FAILURE, LaunchError};
use pgspawn::launch::{ChildStatus, LaunchConfig, Launcher, MarkerWriter, TokioSpawner};
use pgspawn_test_utils::SharedBuffer;
use pgspawn_test_utils::builders::ConfigFileBuilder;
use pgspawn_test_utils::fake_spawner::{FailingSpawner, ReapedSpawner, RecordingSpawner};

fn shell_config(script: &str) -> LaunchConfig {
    let cfg = ConfigFileBuilder::new().shell(script).build();
    LaunchConfig::resolve(&cfg, None, false)
}

#[tokio::test]
async fn successful_launch_prints_phases_in_order() {
    init_tracing();

    let buf = SharedBuffer::new();
    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::to_writer(buf.clone()));

    let report = with_timeout(launcher.launch(&shell_config("exit 0")))
        .await
        .expect("launch should succeed");

    assert_eq!(report.status, ChildStatus::Exited(0));
    assert_eq!(
        buf.lines(),
        vec![
            "Fork start",
            "Child Process",
            "AFTER SETPGRP",
            "Parent start",
            "Parent end",
            "Fork end",
        ]
    );
}

#[tokio::test]
async fn failing_child_still_counts_as_successful_launch() {
    init_tracing();

    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::disabled());
    let report = with_timeout(launcher.launch(&shell_config("exit 7")))
        .await
        .expect("child exit code must not fail the launch");

    assert_eq!(report.status, ChildStatus::Exited(7));
}

#[tokio::test]
async fn signalled_child_still_counts_as_successful_launch() {
    init_tracing();

    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::disabled());
    let report = with_timeout(launcher.launch(&shell_config("kill -KILL $$")))
        .await
        .expect("child killed by a signal must not fail the launch");

    assert_eq!(report.status, ChildStatus::Signaled(9));
    assert_eq!(report.status.to_string(), "killed by SIGKILL (9)");
}

#[tokio::test]
async fn child_runs_in_its_own_process_group() {
    init_tracing();

    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::disabled());
    let report = with_timeout(launcher.launch(&shell_config("exit 0")))
        .await
        .expect("launch should succeed");

    let child_pgid = report.child_pgid.expect("child pgid should be readable before wait");
    assert_eq!(child_pgid, report.child_pid as i32);
    assert_ne!(child_pgid, report.parent_pgid);
    assert_eq!(report.parent_pgid, nix::unistd::getpgrp().as_raw());
}

#[tokio::test]
async fn fork_failure_is_reported_once_without_child_markers() {
    init_tracing();

    let buf = SharedBuffer::new();
    let spawner = FailingSpawner::fork_exhausted();
    let mut launcher = Launcher::new(spawner.clone(), MarkerWriter::to_writer(buf.clone()));

    let err = launcher
        .launch(&LaunchConfig::default())
        .await
        .expect_err("spawn failure must fail the launch");

    assert!(matches!(err, LaunchError::ForkFailed(_)), "got {err:?}");
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    assert_eq!(spawner.calls(), 1, "no retries on fork failure");

    let lines = buf.lines();
    assert_eq!(lines, vec!["Fork start", "Fork failed, quitting!!!!!!"]);
    assert!(!lines.iter().any(|l| l.starts_with("Child Process")));
}

#[tokio::test]
async fn missing_program_is_an_exec_failure() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .target("/nonexistent/pgspawn-missing-interpreter", &["missing", "-x"])
        .build();
    let launch_cfg = LaunchConfig::resolve(&cfg, None, false);

    let buf = SharedBuffer::new();
    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::to_writer(buf.clone()));

    let err = launcher
        .launch(&launch_cfg)
        .await
        .expect_err("exec of a missing program must fail");

    match &err {
        LaunchError::ExecFailed { program, .. } => {
            assert_eq!(program, "/nonexistent/pgspawn-missing-interpreter");
        }
        other => panic!("expected ExecFailed, got {other:?}"),
    }
    assert_eq!(err.exit_code(), EXIT_EXEC_FAILED);
    assert_eq!(
        buf.lines(),
        vec!["Fork start", "Child Process", "AFTER SETPGRP", "Child Process end"]
    );
}

#[tokio::test]
async fn working_dir_and_argv_reach_the_spawner() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");

    let cfg = ConfigFileBuilder::new()
        .working_dir(dir.path())
        .shell("touch ran")
        .build();
    let launch_cfg = LaunchConfig::resolve(&cfg, None, false);

    let spawner = RecordingSpawner::new();
    let mut launcher = Launcher::new(spawner.clone(), MarkerWriter::disabled());
    with_timeout(launcher.launch(&launch_cfg))
        .await
        .expect("launch should succeed");

    assert!(marker.exists(), "child should run in the configured working_dir");

    let records = spawner.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].program, "/bin/sh");
    assert_eq!(records[0].args, vec!["sh", "-c", "touch ran"]);
    assert_eq!(records[0].working_dir.as_deref(), Some(dir.path()));
}

#[tokio::test]
async fn argv0_is_passed_separately_from_program_path() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let cfg = ConfigFileBuilder::new()
        .working_dir(dir.path())
        .target("/bin/sh", &["custom-argv0", "-c", "echo \"$0\" > argv0.txt"])
        .build();
    let launch_cfg = LaunchConfig::resolve(&cfg, None, false);

    let mut launcher = Launcher::new(TokioSpawner, MarkerWriter::disabled());
    with_timeout(launcher.launch(&launch_cfg))
        .await
        .expect("launch should succeed");

    let written = std::fs::read_to_string(dir.path().join("argv0.txt")).unwrap();
    assert_eq!(written.trim(), "custom-argv0");
}

#[tokio::test]
async fn wait_failure_is_reported_without_parent_end() {
    init_tracing();

    let cfg = ConfigFileBuilder::new().target("/bin/sh", &["sh", "-c", "exit 0"]).build();
    let launch_cfg = LaunchConfig::resolve(&cfg, None, false);

    let buf = SharedBuffer::new();
    let mut launcher = Launcher::new(ReapedSpawner, MarkerWriter::to_writer(buf.clone()));

    let err = with_timeout(launcher.launch(&launch_cfg))
        .await
        .expect_err("waiting on an already-reaped child must fail");

    assert!(matches!(err, LaunchError::WaitFailed(_)), "got {err:?}");
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    assert_eq!(
        buf.lines(),
        vec!["Fork start", "Child Process", "AFTER SETPGRP", "Parent start"]
    );
}
