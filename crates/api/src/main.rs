use std::env;

use anyhow::Result;
use wayfarer_api::build_app;
use wayfarer_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("wayfarer_api");

    let assets_root = env::var("WAYFARER_ASSETS_ROOT").unwrap_or_else(|_| "assets".to_string());
    let bind = env::var("WAYFARER_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app(&assets_root).await?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, assets_root = %assets_root, "wayfarer api started");

    axum::serve(listener, app).await?;
    Ok(())
}
