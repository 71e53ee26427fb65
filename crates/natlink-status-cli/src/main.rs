//! CLI entry point - the composition root.
//!
//! Parses the arguments, bootstraps the status object and dispatches to the
//! handlers. Errors are mapped to exit codes through [`CliError`].

use std::process::ExitCode;

use clap::Parser;

use natlink_status_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers, init_logging};

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;
    let mut ctx = bootstrap(config)?;

    match cli.command.unwrap_or(Commands::Status { json: false }) {
        Commands::Status { json } => handlers::status::execute(&mut ctx, json),
        Commands::Paths => handlers::paths::execute(&mut ctx),
        Commands::Aliases => handlers::aliases::execute(&mut ctx),
        Commands::Config { command } => handlers::config::execute(&mut ctx, command),
        Commands::Profile { user, profile_dir } => {
            handlers::profile::execute(&mut ctx, &user, &profile_dir)
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
