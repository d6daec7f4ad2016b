//! Standalone REST API server binary.
//!
//! # Environment Variables
//! - `MEDISCREEN_STORE`: `sqlite` (default) or `memory`
//! - `MEDISCREEN_DB_PATH`: SQLite file (default: "mediscreen-patient.db")
//! - `MEDISCREEN_REST_ADDR`: Server address (default: "0.0.0.0:8081")
//! - `RUST_LOG`: tracing filter, on top of `mediscreen=info`

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediscreen_patient_core::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediscreen=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServiceConfig::from_env()?;
    let service = Arc::new(cfg.store().open()?);

    match cfg.db_path() {
        Some(path) => tracing::info!("-- Using SQLite store at {}", path.display()),
        None => tracing::info!("-- Using in-memory store"),
    }
    tracing::info!("-- Starting Mediscreen patient API on {}", cfg.rest_addr());

    let app = mediscreen_patient_api::router(service);
    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
