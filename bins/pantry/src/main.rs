//! Pantry - household ingredient tracking with nutrition lookup
//!
//! `pantry serve` runs the HTTP API; the other subcommands query the
//! nutrition resolver directly from the terminal.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use pantry_core::config::Config;
use pantry_core::error::exit_codes;
use pantry_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod server;
mod state;

/// Household ingredient tracking with nutrition lookup
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to pantry.toml in the usual places)
    #[arg(short, long, global = true, env = "PANTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Look up nutrition values for a food
    Lookup {
        /// Food name, e.g. 西兰花
        name: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dietary notes for a food
    Suggest {
        /// Food name
        name: String,
    },

    /// List every food in the reference table
    Foods {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return exit_code(exit_codes::CONFIG_ERROR);
        }
    };

    let mut telemetry = TelemetryConfig::from(&config.schema.logging);
    if cli.verbose {
        telemetry.log_level = "debug".to_string();
    } else if !matches!(cli.command, Commands::Serve { .. }) {
        telemetry.log_level = "warn".to_string();
    }
    if let Err(e) = pantry_telemetry::init_with_config(&telemetry) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        return exit_code(exit_codes::CONFIG_ERROR);
    }

    let result = match cli.command {
        Commands::Serve { port } => commands::serve::run(config, port).await,
        Commands::Lookup { name, json } => commands::lookup::run(&config, &name, json).await,
        Commands::Suggest { name } => commands::suggest::run(&config, &name).await,
        Commands::Foods { json } => commands::foods::run(json),
    };

    match result {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code(exit_codes::FAILURE)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
