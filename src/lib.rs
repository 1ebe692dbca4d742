// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod launch;
pub mod logging;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::resolve_config;
use crate::errors::Result;
use crate::launch::{LaunchConfig, Launcher, MarkerWriter, TokioSpawner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (explicit `--config`, `Pgspawn.toml`, or defaults)
/// - CLI overrides
/// - the launcher with the real spawner and stdout markers
///
/// Returns `Ok(())` whenever the child was created and waited for,
/// whatever its own exit status was.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;
    let launch_cfg = LaunchConfig::resolve(&cfg, args.target, args.quiet_markers);

    if args.dry_run {
        print_dry_run(&launch_cfg);
        return Ok(());
    }

    let markers = if launch_cfg.markers {
        MarkerWriter::stdout()
    } else {
        MarkerWriter::disabled()
    };

    let mut launcher = Launcher::new(TokioSpawner, markers);
    let report = launcher.launch(&launch_cfg).await?;

    info!(
        child_pid = report.child_pid,
        status = %report.status,
        "launch finished"
    );
    debug!(?report, "launch report");

    Ok(())
}

/// Simple dry-run output: print what would be executed.
fn print_dry_run(cfg: &LaunchConfig) {
    println!("pgspawn dry-run");
    println!("  program: {}", cfg.target.program_display());
    println!("  argv: {:?}", cfg.target.args_display());
    match &cfg.working_dir {
        Some(dir) => println!("  working_dir: {}", dir.display()),
        None => println!("  working_dir: (inherited)"),
    }
    println!("  markers: {}", cfg.markers);

    debug!("dry-run complete (no process spawned)");
}
