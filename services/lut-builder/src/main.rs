//! Lookup-table builder.
//!
//! Sweeps a multi-dimensional parameter grid through the SBDART
//! radiative-transfer solver and assembles the results into a single
//! labeled lookup-table artifact.

mod config;
mod run;

use anyhow::Result;
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "lut-builder")]
#[command(about = "Build radiative-transfer lookup tables by sweeping SBDART over a grid")]
struct Args {
    /// Run configuration file path
    #[arg(short, long, default_value = "config/run.yaml")]
    config: String,

    /// Override the artifact output path
    #[arg(short, long)]
    output: Option<String>,

    /// Override the number of concurrent solver invocations
    #[arg(short, long)]
    workers: Option<usize>,

    /// Keep failed invocations' workspaces for inspection
    #[arg(long)]
    keep_workspaces: bool,

    /// Print the recognized solver parameters and exit
    #[arg(long)]
    list_params: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if args.list_params {
        list_params();
        return Ok(());
    }

    info!(config = %args.config, "Starting lookup-table builder");

    let mut config = RunConfig::load(args.config.as_ref())?;
    if let Some(output) = args.output {
        config.output = output.into();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.keep_workspaces {
        config.solver.keep_workspaces = true;
    }

    // Ctrl-C aborts the sweep; partial results are discarded.
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    let path = run::execute(&config, shutdown_rx).await?;
    info!(path = %path.display(), "Done");
    Ok(())
}

/// Print the solver parameter table: name, default, description.
fn list_params() {
    for spec in sbdart_driver::params::PARAMETERS {
        println!("{:10} {:>12}  {}", spec.name, spec.default.to_string(), spec.description);
    }
}
