//! foopoc entry point
//!
//! Parses CLI arguments, dispatches to the command and exits non-zero on
//! failure. All startup logic lives in the CLI module.

use foopoc::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
