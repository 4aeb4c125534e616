mod config;
mod errors;
mod export;
mod normalize;
mod relay;
mod routes;
mod state;
mod textkernel;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::textkernel::{DocumentService, TextkernelClient};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Match API v{}", env!("CARGO_PKG_VERSION"));

    let documents: Option<Arc<dyn DocumentService>> =
        match TextkernelClient::from_config(&config.textkernel) {
            Some(client) => {
                info!("Textkernel client initialized ({})", config.textkernel.base_url);
                Some(Arc::new(client?))
            }
            None => {
                warn!("Textkernel credentials missing; parse and score requests will fail");
                None
            }
        };

    info!(
        "Upload limit: {} bytes per file",
        config.max_upload_bytes
    );

    let state = AppState::new(config.clone(), documents);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
