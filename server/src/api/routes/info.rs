//! Service information endpoint

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::config::{AppConfig, QueryMode};
use crate::core::constants::{APP_DESCRIPTION, APP_NAME};
use crate::domain::QueryBackend;

#[derive(Clone)]
pub struct InfoApiState {
    pub http_url: String,
    pub upstream_url: String,
    pub mode: QueryMode,
}

impl InfoApiState {
    /// Addresses from `config`; the mode reported is the one `backend` runs.
    pub fn new(config: &AppConfig, backend: QueryBackend) -> Self {
        Self {
            http_url: format!("http://{}:{}", config.server.host, config.server.port),
            upstream_url: config.upstream.url.clone(),
            mode: backend.mode(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoEndpoints {
    pub http: String,
    pub upstream: String,
    pub docs: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub protocols: Vec<&'static str>,
    pub endpoints: InfoEndpoints,
    /// `filter` or `pushdown`
    pub query_mode: String,
}

pub fn routes(state: InfoApiState) -> Router<()> {
    Router::new().route("/info", get(info)).with_state(state)
}

/// Service name, version and where it talks to
#[utoipa::path(
    get,
    path = "/info",
    tag = "health",
    responses(
        (status = 200, description = "Service information", body = InfoResponse)
    )
)]
pub async fn info(State(state): State<InfoApiState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        description: APP_DESCRIPTION,
        protocols: vec!["HTTP", "gRPC"],
        endpoints: InfoEndpoints {
            http: state.http_url,
            upstream: state.upstream_url,
            docs: "/api/docs",
        },
        query_mode: state.mode.to_string(),
    })
}
