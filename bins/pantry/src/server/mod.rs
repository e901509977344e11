//! HTTP API

mod error;
mod health;
mod ingredients;
mod nutrition;
mod users;

use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use pantry_core::config::ServerConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router
pub fn router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(server.cors_max_age_secs));

    let api = Router::new()
        .route("/nutrition/search", get(nutrition::search))
        .route("/nutrition/suggestions", get(nutrition::suggestions))
        .route("/nutrition/foods", get(nutrition::foods))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:user_id",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route(
            "/users/:user_id/ingredients",
            get(ingredients::list).post(ingredients::add),
        )
        .route("/users/:user_id/ingredients/expiring", get(ingredients::expiring))
        .route(
            "/users/:user_id/ingredients/:id",
            get(ingredients::get)
                .put(ingredients::update)
                .delete(ingredients::remove),
        );

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until ctrl-c or SIGTERM
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
