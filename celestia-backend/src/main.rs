use celestia_backend::config;
use celestia_backend::module::catalog::{
    render_json, render_table, CatalogOrchestrator, ReqwestTransport, Session,
};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Fetch the planet catalog and report the mean gravity of each planet's moons.
#[derive(Debug, Parser)]
#[command(name = "celestia", version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = config::read_config(&args.config)?;

    // Initialize logging
    let _logging_guard =
        celestia_backend::logging::init_logging(&config.log_dir, "celestia", &config.log_level)?;

    tracing::info!("Celestia starting...");
    tracing::info!("Catalog endpoint: {}", config.catalog_url());

    let transport = Arc::new(ReqwestTransport::new(config)?);
    let orchestrator = CatalogOrchestrator::new(transport, config);

    let output = Session::scope(async {
        orchestrator.fetch_enriched_catalog().await?;

        // Read back through the session, the way other consumers of the flow would
        let results = Session::get().context("Catalog result was not published to the session")?;
        if args.json {
            render_json(&results).context("Failed to serialize catalog result")
        } else {
            Ok(render_table(&results))
        }
    })
    .await?;

    println!("{}", output);
    Ok(())
}
