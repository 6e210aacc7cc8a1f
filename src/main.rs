//! Tutorial runner CLI - verifies the Kafka getting-started documentation
//!
//! Drives the documented ZooKeeper/Kafka installation against a reachable
//! Kubernetes cluster and exits 0 only if a produce/consume round-trip
//! through the port-forwarded broker succeeds.

use std::path::PathBuf;

use clap::Parser;
use tutorial_runner::common::{logging, Config, Error};
use tutorial_runner::{runner, Mode};

#[derive(Parser)]
#[command(name = "tutorial-runner", about = "Kafka getting-started tutorial verification")]
#[command(version, long_about = None)]
struct Cli {
    /// Installation front-end: 'helm' or 'stackablectl'
    mode: Option<String>,

    /// Path to the TOML configuration file (default: ./tutorial.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the tutorial resource manifests
    #[arg(long, default_value = "manifests")]
    manifest_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    // Mode is validated by hand so that a missing or unknown token exits 1
    // with a usage hint before any tool is invoked.
    let mode = match cli.mode.as_deref().map(str::parse::<Mode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: tutorial-runner <helm|stackablectl>");
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: missing installation mode");
            eprintln!("Usage: tutorial-runner <helm|stackablectl>");
            std::process::exit(1);
        }
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Racing against Ctrl-C drops the run future, which releases the
    // port-forward and artifact guards before the process exits.
    let result = tokio::select! {
        res = runner::run(mode, &config, &cli.manifest_dir) => res,
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
