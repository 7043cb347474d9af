//! CLI module for foopoc
//!
//! Provides command-line interface for:
//! - serve: Connect to the database, discover the provider and serve HTTP
//! - migrate: Apply or revert the schema migrations

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, Direction};
pub use commands::{migrate, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
