//! xrpl-sale: command-line client for the XRPL.Sale API
//!
//! Entry point for the xrpl-sale application.

use std::path::PathBuf;
use std::process::ExitCode;

use xrpl_sale::config::{
    Cli, Command, ConfigError, ValidatedConfig, defaults, write_default_config,
};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return handle_init(output.as_ref());
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(cli.command, config)
}

/// Handles the `init` subcommand.
fn handle_init(output: Option<&PathBuf>) -> ExitCode {
    let path = match output.cloned().or_else(defaults::config_path) {
        Some(path) => path,
        None => {
            eprintln!("Error: {}", ConfigError::NoConfigDir);
            return exit_code::CONFIG_ERROR;
        }
    };

    match write_default_config(&path) {
        Ok(()) => {
            println!("Configuration template written to: {}", path.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: Command, config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(command, &config)) {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(run::RunError::Config(e)) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
        Err(e) if e.is_input_error() => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            exit_code::runtime_error()
        }
    }
}
