//! API server initialization

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::info::InfoApiState;
use super::routes::{assets, health, info};
use crate::core::CoreApp;
use crate::core::config::AppConfig;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::domain::AssetService;

/// Build the full HTTP router
pub fn build_router(assets: AssetService, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .merge(info::routes(InfoApiState::new(config, assets.backend())))
        .nest("/api", assets::routes(assets))
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Serve until shutdown is triggered; returns CoreApp for cleanup
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.as_str();
        let port = app.config.server.port;

        let router = build_router(app.assets.clone(), &app.config);

        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", host, port))?;
        tracing::debug!(addr = ?listener.local_addr().ok(), "HTTP server listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}
