//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface of the Natlink status tool.
///
/// Global options describe where Natlink and its settings live; every one
/// of them can also be given through the environment (or a `.env` file).
#[derive(Parser)]
#[command(name = "natlink-status")]
#[command(about = "Report how Natlink, Dragon, Vocola and Unimacro are installed and configured")]
#[command(version)]
pub struct Cli {
    /// Natlink settings file (default: ~/.natlink/natlinkstatus.ini)
    #[arg(long = "settings-file", env = "NATLINK_SETTINGS_FILE", global = true)]
    pub settings_file: Option<PathBuf>,

    /// Natlink core directory (default: the directory of this executable)
    #[arg(long = "core-dir", env = "NATLINK_CORE_DIR", global = true)]
    pub core_dir: Option<PathBuf>,

    /// Module search path scanned for Vocola and Unimacro, in the platform's path-list syntax
    #[arg(long = "search-path", env = "NATLINK_SEARCH_PATH", global = true)]
    pub search_path: Option<String>,

    /// Python version whose registry entries record Natlink (e.g. 3.8-32)
    #[arg(long = "python-version", env = "NATLINK_PYTHON_VERSION", global = true)]
    pub python_version: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
