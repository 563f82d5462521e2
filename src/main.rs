use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, AppState};

/// Main entry point for the MedPredict application
///
/// Loads `.env`, resolves the catalog and engine configuration once, and serves the REST API
/// until interrupted.
///
/// # Environment Variables
/// - `MEDPREDICT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDPREDICT_CATALOG_PATH`: catalog YAML override (default: builtin catalog)
/// - `MEDPREDICT_MAX_RESULTS`: result limit (default: 3)
/// - `MEDPREDICT_MIN_MATCH_SCORE`: minimum match score (default: 0.0)
/// - `MEDPREDICT_SIMULATED_LATENCY_MS`: artificial delay before each assessment (default: 0)
///
/// # Returns
/// * `Ok(())` - If the server starts, runs and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medpredict_run=info".parse()?)
                .add_directive("medpredict_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("MEDPREDICT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let state = AppState::from_env()?;

    tracing::info!("++ Starting MedPredict REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- MedPredict stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
