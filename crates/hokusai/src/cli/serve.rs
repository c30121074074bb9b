//! `hokusai serve` handler.

use hokusai::{AppState, HokusaiConfig, HokusaiResult, bind, build_studio, create_router, serve};
use std::sync::Arc;
use tracing::info;

/// Build collaborators and serve the HTTP API until stopped.
pub async fn run_serve(config: &HokusaiConfig) -> HokusaiResult<()> {
    let studio = build_studio(config)?;
    let router = create_router(AppState::new(Arc::new(studio)));

    let address = config.server().address();
    let listener = bind(address.as_str()).await?;
    info!(%address, "Starting Hokusai server");
    serve(listener, router).await?;
    Ok(())
}
