//! Lectern API server entry point.

use std::error::Error;
use std::net::SocketAddr;

use lectern_api::config::ServerConfig;
use lectern_api::routes;
use lectern_api::state::AppState;
use lectern_api::telemetry;
use lectern_store::schema::MIGRATOR;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    let tracer_provider = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Lectern API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer()?)
        .with_state(AppState::postgres(pool));

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry::shutdown(tracer_provider);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
