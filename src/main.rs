use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use trips_core::config::{data_file_from_env_value, rest_addr_from_env_value};
use trips_core::{CoreConfig, TripCatalog, TripService};

/// Main entry point for the trip search server
///
/// Loads the trip catalogue once and serves the REST API until Ctrl+C or SIGTERM.
///
/// # Environment Variables
/// - `TRIPS_REST_ADDR`: REST server address (default: "0.0.0.0:4001")
/// - `TRIPS_DATA_FILE`: YAML or JSON catalogue file (default: the bundled catalogue)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, catalogue loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trips_run=info".parse()?)
                .add_directive("trips_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = rest_addr_from_env_value(std::env::var("TRIPS_REST_ADDR").ok())?;
    let cfg = CoreConfig::new(data_file_from_env_value(
        std::env::var("TRIPS_DATA_FILE").ok(),
    ))?;

    let catalog = TripCatalog::load(&cfg)?;
    tracing::info!("++ Starting trip search REST on {}", rest_addr);

    api_rest::serve(rest_addr, AppState::new(TripService::new(catalog))).await
}
