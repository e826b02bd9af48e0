use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::Uri;
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    DEFAULT_UPSTREAM_URL,
};
use crate::domain::assets::SUMMARY_DAY_LIMIT;

// =============================================================================
// Query Mode Enum
// =============================================================================

/// Where filters are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Fetch every asset and filter in memory
    #[default]
    Filter,
    /// Translate filters into the upstream XPath
    Pushdown,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Filter => write!(f, "filter"),
            QueryMode::Pushdown => write!(f, "pushdown"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Upstream XML service section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpstreamFileConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Query section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryFileConfig {
    pub mode: Option<QueryMode>,
    /// Daily entries kept per asset, 0 keeps all
    pub summary_days: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub upstream: Option<UpstreamFileConfig>,
    pub query: Option<QueryFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of top-level fields that are not recognized
    fn unknown_fields(&self) -> Vec<String> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                current.host = server.host;
            }
            if server.port.is_some() {
                current.port = server.port;
            }
        }

        if let Some(upstream) = other.upstream {
            let current = self.upstream.get_or_insert_with(UpstreamFileConfig::default);
            if upstream.url.is_some() {
                tracing::trace!(url = ?upstream.url, "Merging upstream.url");
                current.url = upstream.url;
            }
            if upstream.timeout_secs.is_some() {
                current.timeout_secs = upstream.timeout_secs;
            }
        }

        if let Some(query) = other.query {
            let current = self.query.get_or_insert_with(QueryFileConfig::default);
            if query.mode.is_some() {
                tracing::trace!(mode = ?query.mode, "Merging query.mode");
                current.mode = query.mode;
            }
            if query.summary_days.is_some() {
                current.summary_days = query.summary_days;
            }
        }
    }
}

// =============================================================================
// Runtime Config
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// gRPC endpoint of the XML service (`http://host:port`)
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub mode: QueryMode,
    /// Daily entries kept per asset, 0 keeps all
    pub summary_days: usize,
}

impl QueryConfig {
    pub fn day_limit(&self) -> Option<usize> {
        (self.summary_days > 0).then_some(self.summary_days)
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.assetlens/assetlens.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_home(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::layer(cli, file_config);
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            upstream = %config.upstream.url,
            mode = %config.query.mode,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn layer(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();
        let file_upstream = file_config.upstream.unwrap_or_default();
        let file_query = file_config.query.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let upstream = UpstreamConfig {
            url: cli
                .upstream_url
                .clone()
                .or(file_upstream.url)
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            timeout_secs: cli
                .upstream_timeout_secs
                .or(file_upstream.timeout_secs)
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let query = QueryConfig {
            mode: cli.query_mode.or(file_query.mode).unwrap_or_default(),
            summary_days: cli
                .summary_days
                .or(file_query.summary_days)
                .unwrap_or(SUMMARY_DAY_LIMIT),
        };

        Self {
            server,
            upstream,
            query,
        }
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        let uri: Uri = self.upstream.url.parse().with_context(|| {
            format!(
                "Configuration error: upstream.url is not a valid URL: {}",
                self.upstream.url
            )
        })?;
        if !matches!(uri.scheme_str(), Some("http" | "https")) || uri.host().is_none() {
            anyhow::bail!(
                "Configuration error: upstream.url must be http(s)://host:port, got '{}'",
                self.upstream.url
            );
        }

        if self.upstream.timeout_secs == 0 {
            anyhow::bail!("Configuration error: upstream.timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

/// Get the profile config path (~/.assetlens/assetlens.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
