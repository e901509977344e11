//! `pantry serve`

use crate::server;
use crate::state::{AppState, build_resolver};
use anyhow::Context;
use pantry_core::config::Config;
use pantry_core::error::exit_codes;
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API until shutdown
pub async fn run(mut config: Config, port: Option<u16>) -> anyhow::Result<i32> {
    if let Some(port) = port {
        config.schema.server.port = port;
    }
    let schema = &config.schema;

    let nutrition = build_resolver(&schema.nutrition)?;
    let remote = nutrition.resolver.has_remote();
    let state = Arc::new(AppState::new(schema, nutrition));
    let app = server::router(state, &schema.server);

    let address = schema.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(
        address = %address,
        config = ?config.path,
        remote_lookup = remote,
        "Pantry API listening"
    );

    server::serve(listener, app).await.context("Server error")?;
    info!("Server stopped");
    Ok(exit_codes::SUCCESS)
}
