//! Application shell: load configuration, bring up storage, start a
//! supervisor per configured topic, then run until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::shutdown::ShutdownService;
use crate::data::postgres::PostgresService;
use crate::manager::IngestionManager;
use crate::mirror::MirrorClient;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub database: Arc<PostgresService>,
    pub manager: Arc<IngestionManager>,
}

impl CoreApp {
    /// Run the application: parse configuration, initialize dependencies,
    /// start ingestion, and block until shutdown completes.
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let cli_config = cli::parse();
        let app = Self::init(&cli_config).await?;
        Self::start(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli).context("failed to load configuration")?;
        Self::init_logging(&config.log);

        tracing::debug!("application starting");

        let database = PostgresService::init(&config.database_url)
            .await
            .context("failed to initialize postgres")?;
        let database = Arc::new(database);

        let mirror = MirrorClient::new(config.mirror_rest_url.clone());
        let shutdown = ShutdownService::new();

        let manager = Arc::new(IngestionManager::new(
            mirror,
            config.mirror_grpc_url.clone(),
            database.pool().clone(),
            config.poll_interval_ms,
            config.page_delay_ms,
            shutdown.clone(),
        ));

        Ok(Self {
            config,
            database,
            manager,
            shutdown,
        })
    }

    fn init_logging(filter: &str) {
        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter.to_string())
            .init();
    }

    async fn start(app: Self) -> Result<()> {
        app.shutdown.install_signal_handlers();

        let health_check = app.database.start_health_check_task(app.shutdown.subscribe());
        app.shutdown.register(health_check).await;

        app.manager.start(app.config.topics.clone()).await;

        tracing::info!(
            topics = app.config.topics.len(),
            poll_interval_ms = app.config.poll_interval_ms,
            "ingestion started"
        );

        app.shutdown.wait().await;
        app.manager.stop().await;
        app.database.close().await;

        Ok(())
    }
}
