//! Storefront server: edge gate, session introspection and admin API.
//!
//! Main entry point that wires the workspace crates together and starts
//! the server.

use tracing_subscriber::{EnvFilter, fmt};

use storefront_core::config::{AppConfig, DEVELOPMENT_ENV};
use storefront_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| DEVELOPMENT_ENV.to_string());

    let config = match load_configuration(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load and validate configuration for `env`.
fn load_configuration(env: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::load(env)?;
    config.validate(env)?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!("Starting storefront v{} (env: {env})", env!("CARGO_PKG_VERSION"));
    if config.auth.uses_placeholder_secret() {
        tracing::warn!("Using the placeholder session secret; never deploy this configuration");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Fails fast on an invalid route policy.
    let state = storefront_api::build_state(config)?;
    let app = storefront_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Storefront server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Storefront server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
