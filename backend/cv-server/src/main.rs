use cv_carevoice::{CareVoiceApi, HttpCareVoiceClient};
use cv_config::{Config, StorageBackend};
use cv_server::error::{Result as ServerErrorResult, ServerError};
use cv_server::{AppState, build_router, logger};
use cv_store::{InMemoryUserRepository, SqliteUserRepository, UserRepository};

use std::error::Error;
use std::net::SocketAddr;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::net::TcpListener;

const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Variables already in the environment take precedence over .env
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = log_file_path(&config)?;

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting cv-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let users = open_user_store(&config).await?;
    let api: Arc<dyn CareVoiceApi> = Arc::new(HttpCareVoiceClient::new(&config.carevoice)?);
    info!("CareVoice client targeting {}", config.carevoice.api_base_url);

    let app_state = AppState::new(&config, users, api)?;

    // Drop quota state of clients that have gone quiet
    let rate_limiter = app_state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.retain_recent();
            debug!(
                "Rate limiter tracking {} clients",
                rate_limiter.tracked_clients()
            );
        }
    });

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);
    info!("Health check: http://{}/api/health", actual_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

/// Log file under the config directory, when one is configured
fn log_file_path(config: &Config) -> ServerErrorResult<Option<PathBuf>> {
    let Some(ref filename) = config.logging.file else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    Ok(Some(log_dir.join(filename)))
}

async fn open_user_store(config: &Config) -> ServerErrorResult<Arc<dyn UserRepository>> {
    let users: Arc<dyn UserRepository> = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory user store; registered users are lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
        StorageBackend::Sqlite => {
            let database_path = config.database_path()?;
            info!("Opening user database: {}", database_path.display());
            Arc::new(SqliteUserRepository::connect(&database_path).await?)
        }
    };

    info!("User store ready with {} users", users.count().await?);
    Ok(users)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            // Without a signal handler, keep serving until the process is killed
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
