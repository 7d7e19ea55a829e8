use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, warn};

use jotter_api::telemetry::init_tracing;
use jotter_api::{build_router, AppState, Config};
use jotter_db::{log_pool_metrics, Database};

const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let _file_guard = init_tracing(&config.log);

    info!(
        log_format = ?config.log.format,
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    info!(config = ?config, "Configuration loaded");

    let db = Database::connect_with_config(&config.database_url, config.pool_config()).await?;
    db.migrate().await?;
    info!("Database migrations applied");

    let metrics_pool = db.pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(POOL_METRICS_INTERVAL);
        loop {
            interval.tick().await;
            log_pool_metrics(&metrics_pool);
        }
    });

    let state = AppState::from_config(&config, db);
    let app = build_router(state, &config.allowed_origins);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
