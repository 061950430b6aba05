//! # BeFast Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the BeFast CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system from `-v`, `DEBUG` and `RUST_LOG`
//! - Loading the configuration file into an `AppConfig`
//! - Routing execution to the command handlers
//! - Mapping every failure to a message and exit code 1
//!
//! ## Examples
//!
//! ```bash
//! befast login befast.acme.dev
//! befast init demo
//! cd demo && befast deploy
//!
//! # local stacks
//! befast compose up
//! DEBUG=befast befast compose down
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

use crate::common::{system, ui};
use crate::core::config::{self, AppConfig};
use crate::core::error::BefastError;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "befast",
    about = "BeFast: deploy apps to your own BeFast host",
    long_about = "Log in to a BeFast host, scaffold example projects, deploy them,\n\
                  and run local docker compose stacks on a shared network.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to the config file holding host and apikey.
    #[arg(long, global = true, env = "BEFAST_CONFIG")]
    config: Option<String>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Print the CLI version.
    #[command(alias = "v")]
    Version,
    /// Print the current working directory.
    Cwd,
    /// Add variables from ./.env.example that are missing in ./.env.
    #[command(name = "dotenv_example")]
    DotenvExample,
    /// Run docker compose for every file in ./compose on a shared network.
    Compose(commands::compose::ComposeArgs),
    /// Manage custom domains.
    Domains(commands::domains::DomainsArgs),
    /// Obtain an API key for a BeFast host.
    Login(commands::login::LoginArgs),
    /// Scaffold a project from an example.
    Init(commands::init::InitArgs),
    /// Deploy the current directory.
    Deploy(commands::deploy::DeployArgs),
}

/// Log level implied by `-v` occurrences and the `DEBUG` switch.
fn log_level(verbose: u8, debug: bool) -> &'static str {
    match (verbose, debug) {
        (0, false) => "warn",
        (1, false) => "info",
        (0..=2, _) => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let debug = system::debug_from_env();
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose, debug)));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli, debug).await {
        tracing::debug!("Command execution failed: {:?}", e);
        match e.downcast_ref::<BefastError>() {
            Some(BefastError::Usage { message, hint }) => {
                ui::usage_error(&format!("{}. Run", message), hint)
            }
            _ => ui::error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, debug: bool) -> anyhow::Result<()> {
    let config_override = cli.config.as_deref();
    // Commands talking to a host need a readable config store.
    let remote_config = || -> anyhow::Result<AppConfig> {
        let path = config::resolve_config_path(config_override)?;
        config::load_config(&path, debug)
    };

    match cli.command {
        // `version` and `cwd` never look at the config store.
        Commands::Version => commands::meta::handle_version(),
        Commands::Cwd => commands::meta::handle_cwd(),
        Commands::DotenvExample => {
            let cfg = config::load_local_config(config_override, debug);
            commands::dotenv::handle_dotenv(&cfg).await
        }
        Commands::Compose(args) => {
            let cfg = config::load_local_config(config_override, debug);
            commands::compose::handle_compose(args, &cfg).await
        }
        Commands::Domains(args) => commands::domains::handle_domains(args, &remote_config()?).await,
        Commands::Login(args) => commands::login::handle_login(args, &remote_config()?).await,
        Commands::Init(args) => commands::init::handle_init(args, &remote_config()?).await,
        Commands::Deploy(args) => commands::deploy::handle_deploy(args, &remote_config()?).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(1, false), "info");
        assert_eq!(log_level(2, false), "debug");
        assert_eq!(log_level(3, false), "trace");
        assert_eq!(log_level(0, true), "debug");
        assert_eq!(log_level(1, true), "debug");
        assert_eq!(log_level(5, true), "trace");
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            Cli::try_parse_from(["befast", "v"]).unwrap().command,
            Commands::Version
        ));
        assert!(matches!(
            Cli::try_parse_from(["befast", "dotenv_example"]).unwrap().command,
            Commands::DotenvExample
        ));
        let cli = Cli::try_parse_from(["befast", "-vv", "compose", "down"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Compose(_)));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["befast", "launch"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
