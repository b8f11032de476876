use std::sync::Arc;

use api_rest::{AppState, config_from_env, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Receita service
///
/// Loads `.env`, resolves configuration once, and serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `RECEITA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RECEITA_UTC_OFFSET`: clinic UTC offset used for the printed date (default: "-03:00")
/// - `RECEITA_CLINIC_LABEL`: fallback clinic heading (default: "Consultório Médico")
/// - `RUST_LOG`: extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("receita_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("RECEITA_REST_ADDR")
        .unwrap_or_else(|_| receita_core::DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(config_from_env()?);
    tracing::info!(
        utc_offset = %cfg.utc_offset(),
        clinic_label = cfg.clinic_label(),
        "Configuration resolved"
    );
    tracing::info!("++ Starting Receita REST on {}", rest_addr);

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Receita stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
