use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use randomsong_core::{
    load_config, validate_config, BeatSaverClient, Catalog, DirectoryLibrary, Library,
    NoLibrary, RandomSelector,
};
use randomsong_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("RANDOMSONG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog: {}", config.catalog.base_url);
    info!(
        "Search budget: {} attempts, {}ms per fetch",
        config.search.max_retries, config.search.fetch_timeout_ms
    );
    match &config.filter {
        Some(filter) => info!("Filter: {:?}", filter),
        None => info!("No filter configured, every fetched map is accepted"),
    }

    // Create catalog client
    let catalog: Arc<dyn Catalog> = Arc::new(
        BeatSaverClient::new(config.catalog.clone()).context("Failed to create catalog client")?,
    );
    info!("Using catalog: {}", catalog.name());

    // Create local library
    let library: Arc<dyn Library> = match &config.library.path {
        Some(path) => Arc::new(
            DirectoryLibrary::open(path)
                .with_context(|| format!("Failed to open library at {:?}", path))?,
        ),
        None => {
            info!("No library configured, nothing counts as owned");
            Arc::new(NoLibrary)
        }
    };

    let selector = Arc::new(RandomSelector::new(
        catalog,
        library,
        config.search.clone(),
    ));

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), selector));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
