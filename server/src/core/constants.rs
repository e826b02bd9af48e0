// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "AssetLens";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "assetlens";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".assetlens";

/// Short description shown by `/info` and the OpenAPI document
pub const APP_DESCRIPTION: &str = "Query and filter financial asset data from the XML service";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "assetlens.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ASSETLENS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "ASSETLENS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "ASSETLENS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ASSETLENS_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Request body limit (query bodies are small)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Upstream XML Service
// =============================================================================

/// Environment variable for the XML service gRPC URL
pub const ENV_UPSTREAM_URL: &str = "ASSETLENS_UPSTREAM_URL";

/// Environment variable for the upstream request timeout
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "ASSETLENS_UPSTREAM_TIMEOUT_SECS";

/// Default XML service gRPC URL
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:50051";

/// Default upstream request timeout in seconds (connect plus full stream)
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Query
// =============================================================================

/// Environment variable for the query mode (`filter` or `pushdown`)
pub const ENV_QUERY_MODE: &str = "ASSETLENS_QUERY_MODE";

/// Environment variable for the number of daily entries kept per asset
pub const ENV_SUMMARY_DAYS: &str = "ASSETLENS_SUMMARY_DAYS";

// =============================================================================
// Pagination
// =============================================================================

/// Default page size
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i64 = 1000;
