//! CLI command implementations
//!
//! Startup order for `serve`: environment, logging, database pool, provider
//! discovery, HTTP server. Any failure before the server listens is fatal.

use std::path::Path;
use std::sync::Arc;

use crate::auth::OidcClient;
use crate::config::{AppConfig, DatabaseConfig, LogConfig};
use crate::http_server::errors::error_chain;
use crate::http_server::{shutdown_signal, AppState, HttpServer};
use crate::logging::init_logging;
use crate::service::FooService;
use crate::store::{migrations, postgres, PgFooStore};

use super::args::{Command, Direction};
use super::errors::{CliError, CliResult};

/// Parse CLI arguments and run the command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { env_file } => serve(&env_file),
        Command::Migrate {
            direction,
            env_file,
        } => migrate(direction, &env_file),
    }
}

/// Run the HTTP server until SIGINT or SIGTERM
pub fn serve(env_file: &Path) -> CliResult<()> {
    let env_loaded = dotenvy::from_path(env_file);

    let config = AppConfig::from_env().map_err(|e| CliError::config_error(e.to_string()))?;
    init_logging(&config.log).map_err(|e| CliError::logging_error(error_chain(&e)))?;
    log_env_file(env_file, env_loaded);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(run_server(config))
}

async fn run_server(config: AppConfig) -> CliResult<()> {
    let pool = postgres::connect(&config.database)
        .await
        .map_err(|e| CliError::database_error(error_chain(&e)))?;

    let oidc = match OidcClient::discover(config.oidc).await {
        Ok(oidc) => oidc,
        Err(e) => {
            pool.close().await;
            return Err(CliError::provider_error(error_chain(&e)));
        }
    };

    let service = FooService::new(Arc::new(PgFooStore::new(pool.clone())));
    let server = HttpServer::with_config(config.http, AppState::new(service, Arc::new(oidc)));

    let result = server
        .start(shutdown_signal())
        .await
        .map_err(|e| CliError::server_error(e.to_string()));

    pool.close().await;
    match &result {
        Ok(()) => tracing::info!("Server shutdown complete"),
        Err(e) => tracing::error!(error = %e, "Server stopped with an error"),
    }
    result
}

/// Apply or revert the embedded migrations
pub fn migrate(direction: Direction, env_file: &Path) -> CliResult<()> {
    let env_loaded = dotenvy::from_path(env_file);

    init_logging(&LogConfig::default()).map_err(|e| CliError::logging_error(error_chain(&e)))?;
    log_env_file(env_file, env_loaded);

    let database = DatabaseConfig::from_env().map_err(|e| CliError::config_error(e.to_string()))?;
    tracing::info!(direction = ?direction, "Migration direction");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let pool = postgres::connect(&database)
            .await
            .map_err(|e| CliError::database_error(error_chain(&e)))?;

        let result = match direction {
            Direction::Up => migrations::run(&pool).await,
            Direction::Down => migrations::revert(&pool).await,
        };

        pool.close().await;
        result.map_err(|e| CliError::migration_error(error_chain(&e)))
    })
}

fn log_env_file(path: &Path, loaded: Result<(), dotenvy::Error>) {
    match loaded {
        Ok(()) => tracing::debug!(path = %path.display(), "Loaded env file"),
        Err(e) => tracing::info!(
            path = %path.display(),
            error = %e,
            "No env file loaded, proceeding with the process environment"
        ),
    }
}
