//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Environment configuration missing or invalid
    ConfigError,
    /// Logger could not be installed
    LoggingError,
    /// Database pool could not be created
    DatabaseError,
    /// Identity provider discovery failed
    ProviderError,
    /// Migration failed
    MigrationError,
    /// Runtime could not start
    BootFailed,
    /// Server stopped with an error
    ServerError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FOOPOC_CLI_CONFIG_ERROR",
            Self::LoggingError => "FOOPOC_CLI_LOGGING_ERROR",
            Self::DatabaseError => "FOOPOC_CLI_DATABASE_ERROR",
            Self::ProviderError => "FOOPOC_CLI_PROVIDER_ERROR",
            Self::MigrationError => "FOOPOC_CLI_MIGRATION_ERROR",
            Self::BootFailed => "FOOPOC_CLI_BOOT_FAILED",
            Self::ServerError => "FOOPOC_CLI_SERVER_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Logging error
    pub fn logging_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoggingError, msg)
    }

    /// Database error
    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::DatabaseError,
            format!("Error: FGI573 - Getting database connection pool: {}", msg.into()),
        )
    }

    /// Provider discovery error
    pub fn provider_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ProviderError, msg)
    }

    /// Migration error
    pub fn migration_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::MigrationError, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::BootFailed,
            format!("Error: LBTF9J - Initializing the server: {}", msg.into()),
        )
    }

    /// Server error
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::ServerError,
            format!("Error: L4AXAX - Running the http server: {}", msg.into()),
        )
    }

}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
