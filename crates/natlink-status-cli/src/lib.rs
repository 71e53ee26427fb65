//! Command-line front end of the Natlink status report.
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; integration tests use tempfile
#[cfg(test)]
use tempfile as _;

// Used by the main.rs binary
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, init_logging};
pub use commands::Commands;
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
