//! # Application Configuration
//!
//! Process-wide settings read from environment variables once at startup.
//!
//! Construction is an explicit validation step: [`AppConfig::from_lookup`]
//! reads every variable, collects every missing or malformed one, and either
//! returns a complete config or a [`ConfigError`] listing all problems. The
//! resulting value is immutable and is passed down by reference.
//!
//! ## Variables
//! - `POSTGRESQL_URL` (required)
//! - `GOOGLE_OIDC_CLIENT_ID`, `GOOGLE_OIDC_CLIENT_SECRET`,
//!   `GOOGLE_OIDC_PROVIDER_URL`, `REDIRECT_URI` (required)
//! - `LOG_LEVEL`, `LOG_TO_FILE`, `LOG_FILE`
//! - `HOST`, `PORT`, `CORS_ORIGINS`, `SHUTDOWN_GRACE_SECS`
//! - `DB_MAX_CONNECTIONS`

pub mod errors;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::http_server::HttpServerConfig;

pub use errors::{ConfigError, ConfigIssue, ConfigResult};

/// Scopes requested from the identity provider
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "email", "profile"];

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub oidc: OidcConfig,
    pub http: HttpServerConfig,
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Log verbosity and destination
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub to_file: bool,
    pub file_path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::DEBUG,
            to_file: false,
            file_path: PathBuf::from("logs/app.json"),
        }
    }
}

/// Identity provider client settings
#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Issuer URL; discovery document lives under it
    pub provider_url: String,
    /// Callback URL registered with the provider
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

impl OidcConfig {
    /// Cookies are marked `Secure` when the callback itself is served over TLS
    pub fn secure_cookies(&self) -> bool {
        self.redirect_url.starts_with("https://")
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(&lookup);

        let database = DatabaseConfig::read(&mut env);
        let log = LogConfig::read(&mut env);
        let oidc = OidcConfig::read(&mut env);
        let http = read_http(&mut env);

        env.finish()?;
        Ok(Self {
            database,
            log,
            oidc,
            http,
        })
    }
}

impl DatabaseConfig {
    /// Only the database settings; used by the migration command
    pub fn from_env() -> ConfigResult<Self> {
        let lookup = |var: &str| std::env::var(var).ok();
        let mut env = EnvReader::new(&lookup);
        let config = Self::read(&mut env);
        env.finish()?;
        Ok(config)
    }

    fn read(env: &mut EnvReader<'_>) -> Self {
        Self {
            url: env.required("POSTGRESQL_URL"),
            max_connections: env.parse_or("DB_MAX_CONNECTIONS", 10, "a positive integer"),
            acquire_timeout_secs: 5,
        }
    }
}

impl LogConfig {
    fn read(env: &mut EnvReader<'_>) -> Self {
        let defaults = Self::default();

        let level = match env.optional("LOG_LEVEL") {
            Some(raw) => parse_level(&raw).unwrap_or_else(|| {
                env.invalid("LOG_LEVEL", raw, "one of trace, debug, info, warn, error");
                defaults.level
            }),
            None => defaults.level,
        };

        Self {
            level,
            to_file: env.flag("LOG_TO_FILE", defaults.to_file),
            file_path: env
                .optional("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    /// Directory that must exist before the log file can be opened
    pub fn file_dir(&self) -> Option<&Path> {
        self.file_path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl OidcConfig {
    fn read(env: &mut EnvReader<'_>) -> Self {
        Self {
            client_id: env.required("GOOGLE_OIDC_CLIENT_ID"),
            client_secret: env.required("GOOGLE_OIDC_CLIENT_SECRET"),
            provider_url: env.required_url("GOOGLE_OIDC_PROVIDER_URL"),
            redirect_url: env.required_url("REDIRECT_URI"),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn read_http(env: &mut EnvReader<'_>) -> HttpServerConfig {
    let defaults = HttpServerConfig::default();

    HttpServerConfig {
        host: env.optional("HOST").unwrap_or(defaults.host),
        port: env.parse_or("PORT", defaults.port, "a port number"),
        cors_origins: env
            .optional("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins),
        shutdown_grace_secs: env.parse_or(
            "SHUTDOWN_GRACE_SECS",
            defaults.shutdown_grace_secs,
            "a number of seconds",
        ),
    }
}

/// Accepts tracing level names plus the zap-only names still found in older
/// deployment files.
fn parse_level(raw: &str) -> Option<LevelFilter> {
    let normalized = raw.trim().to_ascii_lowercase();
    let name = match normalized.as_str() {
        "dpanic" | "panic" | "fatal" => "error",
        "warning" => "warn",
        other => other,
    };
    LevelFilter::from_str(name).ok()
}

/// Collects issues while reading variables so all of them are reported
struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
    issues: Vec<ConfigIssue>,
}

impl<'a> EnvReader<'a> {
    fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            lookup,
            issues: Vec::new(),
        }
    }

    /// Unset and empty are the same thing
    fn optional(&self, var: &'static str) -> Option<String> {
        (self.lookup)(var).filter(|v| !v.trim().is_empty())
    }

    fn required(&mut self, var: &'static str) -> String {
        self.optional(var).unwrap_or_else(|| {
            self.issues.push(ConfigIssue::Missing { var });
            String::new()
        })
    }

    fn required_url(&mut self, var: &'static str) -> String {
        let value = self.required(var);
        if !value.is_empty() && url::Url::parse(&value).is_err() {
            self.invalid(var, value.clone(), "an absolute URL");
        }
        value
    }

    fn parse_or<T: FromStr>(&mut self, var: &'static str, default: T, expected: &'static str) -> T {
        match self.optional(var) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                self.invalid(var, raw, expected);
                default
            }),
            None => default,
        }
    }

    fn flag(&mut self, var: &'static str, default: bool) -> bool {
        match self.optional(var) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    self.invalid(var, raw, "true or false");
                    default
                }
            },
            None => default,
        }
    }

    fn invalid(&mut self, var: &'static str, value: String, expected: &'static str) {
        self.issues.push(ConfigIssue::Invalid {
            var,
            value,
            expected,
        });
    }

    fn finish(self) -> ConfigResult<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(self.issues))
        }
    }
}
