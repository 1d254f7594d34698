pub mod analysis; // Mock image classifier and scan reports
pub mod api;
pub mod assistant; // OpenRouter proxy + scripted chat
pub mod config;
pub mod db;
pub mod export; // Health data export + Markdown report
pub mod journal; // Symptom journal
pub mod models;
pub mod scans; // Upload validation and scan persistence
pub mod symptom_checker; // API Ninjas proxy
pub mod wellness; // Wellness reminders

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Context(#[from] api::types::ContextError),
    #[error(transparent)]
    Database(#[from] db::DatabaseError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Initialize tracing, load config, and serve the API until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = config::AppConfig::from_env()?;
    let addr = app_config.bind_addr()?;

    // Create the database file and apply migrations before accepting requests
    db::open_database(&app_config.db_path)?;
    tracing::info!(path = %app_config.db_path.display(), "Database ready");

    let ctx = api::ApiContext::from_config(&app_config)?;
    let mut server = api::start_server(ctx, addr).await?;

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    tracing::info!("Shutdown requested");
    server.shutdown();
    server.wait().await;
    Ok(())
}
