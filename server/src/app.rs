//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::GrpcAssetSource;
use crate::domain::query::build_query;
use crate::domain::{AssetService, QueryBackend};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub assets: AssetService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Xpath { query }) => {
                println!("{}", build_query(&query));
                return Ok(());
            }
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config)?;
        Self::start_server(app).await
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        // Connects on first request; the XML service may start after us
        let source = GrpcAssetSource::connect_lazy(&config.upstream)
            .with_context(|| format!("Failed to create upstream client for {}", config.upstream.url))?;
        tracing::debug!(upstream = %source.url(), "Upstream client created");

        let assets = AssetService::new(
            Arc::new(source),
            QueryBackend::from_mode(config.query.mode),
            config.query.day_limit(),
        );

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            assets,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        banner::print_banner(&app.config);

        let server = ApiServer::new(app);
        let app = server.start().await?;
        tracing::debug!(triggered = app.shutdown.is_triggered(), "Server stopped");

        Ok(())
    }
}
