//! Aero router - command-line entrypoint.
//!
//! Loads the route table from configuration, then dumps the resulting tree,
//! resolves paths against it, or validates it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aero_router_lib::config::{ConfigLoader, LogConfig, RouterConfig, ENV_PREFIX};
use aero_router_lib::error::{
    AeroError, AeroResult, ErrorContext, ErrorReporter, TracingErrorReporter,
};
use aero_router_lib::routing::{Route, RouteTable};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the Aero router.
#[derive(Parser, Debug)]
#[clap(name = "aero-router", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route tree
    Print,

    /// Resolve paths against the route table
    Resolve {
        /// Paths to resolve
        #[clap(required = true)]
        paths: Vec<String>,

        /// Emit results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration and route table
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One line of `resolve --json` output.
#[derive(Serialize)]
struct Resolution<'a> {
    path: &'a str,
    route: Option<&'a Route>,
}

/// Initialize the logging system. `RUST_LOG` takes precedence over `log.level`.
fn init_logging(log: &LogConfig) -> AeroResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| AeroError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn gen_config(output: &Path) -> AeroResult<()> {
    info!("Generating default configuration");

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&RouterConfig::default())
        .map_err(|e| AeroError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn resolve(table: &RouteTable, paths: &[String], readers: usize, json: bool) -> AeroResult<()> {
    let resolved = table.resolve_batch(paths, readers);
    let mut out = io::stdout().lock();

    if json {
        let resolutions: Vec<Resolution<'_>> = paths
            .iter()
            .zip(resolved)
            .map(|(path, route)| Resolution { path, route })
            .collect();
        serde_json::to_writer_pretty(&mut out, &resolutions)?;
        writeln!(out)?;
    } else {
        for (path, route) in paths.iter().zip(resolved) {
            match route {
                Some(route) => writeln!(out, "{path} -> {}", route.handler)?,
                None => writeln!(out, "{path} -> not found")?,
            }
        }
    }
    Ok(())
}

fn run(command: Command, config: RouterConfig) -> AeroResult<()> {
    let table = RouteTable::from_config(&config)?;

    match command {
        Command::Print => {
            let mut out = io::stdout().lock();
            table.pretty_print(&mut out)?;
            Ok(())
        }
        Command::Resolve { paths, json } => {
            resolve(&table, &paths, config.lookup.reader_threads, json)
        }
        Command::Validate => {
            info!(routes = table.len(), "Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
    }
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Print);

    let loaded = match &command {
        // Writes the built-in defaults, so no file or environment is read.
        Command::GenConfig { .. } => Ok(RouterConfig::default()),
        _ => ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load(),
    };

    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let result = loaded
        .map_err(AeroError::from)
        .and_then(|config| run(command, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            TracingErrorReporter.report(ErrorContext::new(error, "aero-router"));
            ExitCode::FAILURE
        }
    }
}
