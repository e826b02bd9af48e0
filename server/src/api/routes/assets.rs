//! Asset query endpoints

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, Page, PageParams, paginate, timestamp};
use crate::domain::AssetService;
use crate::domain::assets::AssetRecord;
use crate::domain::query::ALL_ASSETS;
use crate::domain::query::xpath::is_raw_xpath;

/// Preset name accepted by `/api/xpath` for every asset
pub const ALL_ASSETS_PRESET: &str = "allAssets";

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct AssetsApiState {
    pub assets: AssetService,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Query string, e.g. `symbol=AAPL, sector='Technology'`, or raw XPath
    #[validate(length(max = 2048, message = "q must be at most 2048 characters"))]
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    #[validate(length(max = 2048, message = "query must be at most 2048 characters"))]
    pub query: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResponse {
    pub success: bool,
    pub query: String,
    /// Expression sent to the upstream service
    pub xpath: String,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub count: usize,
    pub data: Vec<AssetRecord>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct XpathParams {
    /// Raw XPath expression
    #[validate(length(max = 2048, message = "query must be at most 2048 characters"))]
    pub query: Option<String>,
    /// Preset name (`allAssets`); takes precedence over `query`
    #[serde(rename = "type")]
    #[validate(length(max = 64, message = "type must be at most 64 characters"))]
    pub preset: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct XpathResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    pub data: Vec<AssetRecord>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub example: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryExample {
    pub description: &'static str,
    pub query: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub tickers: Vec<String>,
    pub sectors: Vec<String>,
    pub available_filters: Vec<FilterDescriptor>,
    pub query_format: &'static str,
    pub examples: Vec<QueryExample>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetListParams {
    /// Exact ticker, case-insensitive
    #[validate(length(max = 256, message = "ticker must be at most 256 characters"))]
    pub ticker: Option<String>,
    /// Substring of the company name, case-insensitive
    #[validate(length(max = 256, message = "name must be at most 256 characters"))]
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssetListResponse {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub count: usize,
    pub data: Vec<AssetRecord>,
}

impl From<Page<AssetRecord>> for AssetListResponse {
    fn from(page: Page<AssetRecord>) -> Self {
        Self {
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            count: page.count(),
            data: page.data,
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(assets: AssetService) -> Router<()> {
    let state = AssetsApiState { assets };
    Router::new()
        .route("/query", get(query_get).post(query_post))
        .route("/xpath", get(xpath))
        .route("/filters", get(filters))
        .route("/assets", get(list_assets))
        .route("/assets/{ticker}", get(get_asset))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn run_query(state: &AssetsApiState, query: String, page: PageParams) -> QueryResponse {
    let outcome = state.assets.search(&query).await;
    tracing::debug!(
        query = %query,
        xpath = %outcome.xpath,
        results = outcome.assets.len(),
        "Query evaluated"
    );

    let page = paginate(outcome.assets, page);
    QueryResponse {
        success: true,
        query,
        xpath: outcome.xpath,
        total: page.total,
        limit: page.limit,
        offset: page.offset,
        count: page.count(),
        data: page.data,
        timestamp: timestamp(),
    }
}

/// Search assets with the query language
#[utoipa::path(
    get,
    path = "/api/query",
    tag = "assets",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching assets", body = QueryResponse),
        (status = 400, description = "Invalid parameters")
    )
)]
pub async fn query_get(
    State(state): State<AssetsApiState>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> Json<QueryResponse> {
    let page = PageParams::new(params.limit, params.offset);
    Json(run_query(&state, params.q.unwrap_or_default(), page).await)
}

/// Search assets with the query language (JSON body)
#[utoipa::path(
    post,
    path = "/api/query",
    tag = "assets",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching assets", body = QueryResponse),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn query_post(
    State(state): State<AssetsApiState>,
    ValidatedJson(req): ValidatedJson<SearchRequest>,
) -> Json<QueryResponse> {
    let page = PageParams::new(req.limit, req.offset);
    Json(run_query(&state, req.query.unwrap_or_default(), page).await)
}

/// Resolve the `/api/xpath` input to the expression sent upstream.
fn resolve_xpath(input: &str) -> Result<String, ApiError> {
    let input = input.trim();
    if input.is_empty() || input == ALL_ASSETS_PRESET {
        return Ok(ALL_ASSETS.to_string());
    }
    if is_raw_xpath(input) {
        return Ok(input.to_string());
    }
    Err(ApiError::bad_request(
        "INVALID_XPATH",
        format!(
            "Expected an XPath expression or the '{}' preset, got '{}'",
            ALL_ASSETS_PRESET, input
        ),
    ))
}

/// Run a raw XPath (or preset) against the upstream service
#[utoipa::path(
    get,
    path = "/api/xpath",
    tag = "assets",
    params(XpathParams),
    responses(
        (status = 200, description = "Assets selected by the expression", body = XpathResponse),
        (status = 400, description = "Not an XPath expression or known preset")
    )
)]
pub async fn xpath(
    State(state): State<AssetsApiState>,
    ValidatedQuery(params): ValidatedQuery<XpathParams>,
) -> Result<Json<XpathResponse>, ApiError> {
    let query = params
        .preset
        .or(params.query)
        .unwrap_or_else(|| ALL_ASSETS_PRESET.to_string());
    let expression = resolve_xpath(&query)?;

    let data = state.assets.xpath(&expression).await;
    tracing::debug!(query = %query, xpath = %expression, results = data.len(), "XPath evaluated");

    Ok(Json(XpathResponse {
        success: true,
        query,
        count: data.len(),
        data,
        timestamp: timestamp(),
    }))
}

/// Distinct tickers and sectors plus query-language help
#[utoipa::path(
    get,
    path = "/api/filters",
    tag = "assets",
    responses(
        (status = 200, description = "Available filter values", body = FiltersResponse)
    )
)]
pub async fn filters(State(state): State<AssetsApiState>) -> Json<FiltersResponse> {
    let options = state.assets.filter_options().await;

    Json(FiltersResponse {
        tickers: options.tickers,
        sectors: options.sectors,
        available_filters: vec![
            FilterDescriptor {
                name: "Ticker",
                kind: "string",
                example: "symbol='AAPL'",
            },
            FilterDescriptor {
                name: "Sector",
                kind: "string",
                example: "sector='Technology'",
            },
            FilterDescriptor {
                name: "Name",
                kind: "string",
                example: "name='Apple Inc'",
            },
            FilterDescriptor {
                name: "MarketCap",
                kind: "string",
                example: "marketcap='3.2T'",
            },
        ],
        query_format: "Use field='value' pairs separated by commas, or a raw XPath",
        examples: vec![
            QueryExample {
                description: "Return everything",
                query: "",
            },
            QueryExample {
                description: "Filter by ticker",
                query: "symbol='AAPL'",
            },
            QueryExample {
                description: "Filter by sector",
                query: "sector='Technology'",
            },
            QueryExample {
                description: "Free text over ticker and name",
                query: "nvidia",
            },
        ],
    })
}

/// List assets by exact ticker and/or name substring
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "assets",
    params(AssetListParams),
    responses(
        (status = 200, description = "Paginated assets", body = AssetListResponse),
        (status = 400, description = "Invalid parameters")
    )
)]
pub async fn list_assets(
    State(state): State<AssetsApiState>,
    ValidatedQuery(params): ValidatedQuery<AssetListParams>,
) -> Json<AssetListResponse> {
    let records = state
        .assets
        .list(params.ticker.as_deref(), params.name.as_deref())
        .await;
    let page = paginate(records, PageParams::new(params.limit, params.offset));
    Json(page.into())
}

/// Get one asset by ticker
#[utoipa::path(
    get,
    path = "/api/assets/{ticker}",
    tag = "assets",
    params(("ticker" = String, Path, description = "Ticker symbol, case-insensitive")),
    responses(
        (status = 200, description = "The asset", body = AssetRecord),
        (status = 404, description = "No asset with that ticker")
    )
)]
pub async fn get_asset(
    State(state): State<AssetsApiState>,
    Path(ticker): Path<String>,
) -> Result<Json<AssetRecord>, ApiError> {
    state
        .assets
        .list(Some(&ticker), None)
        .await
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("ASSET_NOT_FOUND", format!("No asset with ticker '{}'", ticker))
        })
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
