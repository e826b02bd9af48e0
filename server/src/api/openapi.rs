//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{assets, health, info};
use crate::domain::assets::AssetRecord;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AssetLens API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Query and filter financial asset data from the XML service"
    ),
    tags(
        (name = "health", description = "Health and service information"),
        (name = "assets", description = "Asset queries")
    ),
    paths(
        // Health
        health::health,
        info::info,
        // Assets
        assets::query_get,
        assets::query_post,
        assets::xpath,
        assets::filters,
        assets::list_assets,
        assets::get_asset,
    ),
    components(schemas(
        // Health
        health::HealthResponse,
        info::InfoResponse,
        info::InfoEndpoints,
        // Assets
        AssetRecord,
        assets::SearchRequest,
        assets::QueryResponse,
        assets::XpathResponse,
        assets::FiltersResponse,
        assets::FilterDescriptor,
        assets::QueryExample,
        assets::AssetListResponse,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AssetLens API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
