// src/main.rs

use pgspawn::errors::LaunchError;
use pgspawn::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("pgspawn error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<(), LaunchError> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
