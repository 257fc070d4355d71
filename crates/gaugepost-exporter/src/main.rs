//! gaugePost exporter
//!
//! Reads `constants.yml` once at startup, reconciles the listed measurements
//! into gauge families, then serves them on `/metrics` until killed.
//! - No reload: a config change needs a restart.
//! - All startup failures are fatal with a descriptive log line.

use clap::Parser;
use prometheus::Registry;
use tracing_subscriber::{fmt, EnvFilter};

use gaugepost_core::reconcile::Reconciler;
use gaugepost_core::Result;
use gaugepost_exporter::{app_state::AppState, cli::Args, config, listen, router};

const CONFIG_FILE: &str = "constants.yml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "exporter failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = config::load_from_file(CONFIG_FILE)?;

    let mut reconciler = Reconciler::new(Registry::new());
    reconciler.reconcile(&cfg.metrics)?;
    tracing::info!(records = cfg.metrics.len(), "reconciled configured metrics");

    let state = AppState::new(reconciler.registry().clone());
    let app = router::build_router(state);

    let addr = listen::ListenAddr::parse(&args.listen_address)?;
    listen::serve(addr, app).await
}
