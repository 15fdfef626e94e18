// File: services/tourlink_backend/src/main.rs
use std::process::ExitCode;
use tokio::net::TcpListener;
use tourlink_backend::{build_app, StartupError, TourlinkServices};
use tourlink_common::logging;
use tourlink_config::{load_config, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet; the level itself comes from the config.
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = logging::init(&config.logging);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::log_error(e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let services = logging::log_result(
        TourlinkServices::from_config(&config).await,
        "External services initialized",
        "Service setup failed",
    )?;
    let app = build_app(&config, services)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Starting server at http://{}", addr);
    info!("API docs available at http://{}/docs", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
