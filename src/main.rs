use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use vuka::rss::{IngestService, IngestionScheduler};
use vuka::web::{AppState, WebServer};
use vuka::{Config, Database};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = vuka::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        vuka::logging::init_console_only(&config.logging.level);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> vuka::Result<()> {
    config.validate()?;

    info!("Vuka news aggregation backend");

    let db = Database::open(&config.database.path).await?;
    info!(
        path = %config.database.path,
        schema_version = db.schema_version().await?,
        "database ready"
    );

    let service = IngestService::new(&config.ingestion, Arc::new(db.clone()))?;
    let scheduler = IngestionScheduler::new(
        service,
        Arc::new(db.clone()),
        config.ingestion.cron_expression(),
    );

    if config.ingestion.enabled {
        scheduler.start().await?;
    } else {
        warn!("scheduled ingestion disabled");
    }

    if config.ingestion.run_on_startup {
        let _ = scheduler.trigger_now();
    }

    let server = WebServer::new(&config.server, AppState::new(db.clone(), scheduler.clone()))?;
    let served = server.run(shutdown_signal()).await;

    scheduler.stop().await?;
    db.close().await;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
