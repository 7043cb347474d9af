//! CLI argument definitions using clap
//!
//! Commands:
//! - foopoc serve [--env-file <path>]
//! - foopoc migrate [--direction up|down] [--env-file <path>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// foopoc - Foo CRUD service with OpenID Connect login
#[derive(Parser, Debug)]
#[command(name = "foopoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Optional dotenv file loaded before reading the environment
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },

    /// Apply or revert the embedded schema migrations
    Migrate {
        /// Migration direction
        #[arg(long, value_enum, default_value_t = Direction::Up)]
        direction: Direction,

        /// Optional dotenv file loaded before reading the environment
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
    },
}

/// Migration direction
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
