mod cli;
mod commands;
mod config;
mod extract;
mod grouper;
mod mcp;
mod pdf;
mod report;
mod sink;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::resolve(cli.config.as_deref())?;
    init_logging(cli.log_level.as_deref(), &cfg)?;

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(cfg).await?;
        }
        Commands::Split {
            registered_courses,
            cgpa,
            history,
            schedule,
            output_dir,
            json,
        } => {
            let inputs = commands::split::SplitInputs {
                registered_courses,
                cgpa,
                history,
                schedule,
            };
            let destination = output_dir.or_else(|| cfg.output.destination());
            let sink = sink::select(destination, cfg.output.staging_root());
            commands::split::run(&inputs, sink.as_ref(), json)?;
        }
        Commands::Detect { path, kind } => {
            commands::detect::run(&path, kind)?;
        }
        Commands::List { path } => {
            commands::list::run(&path)?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries results and the MCP transport.
fn init_logging(cli_level: Option<&str>, cfg: &Config) -> Result<()> {
    let level = cli_level.unwrap_or(cfg.logging.level.as_str());
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(level)?,
    };

    let layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

/// A bare level must be a known level name; anything with `=` or `,` is
/// taken as a full filter directive.
fn level_filter(level: &str) -> Result<EnvFilter> {
    let level = level.trim();
    if !level.contains('=') && !level.contains(',') {
        level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("invalid log level: {level:?}"))?;
    }
    EnvFilter::try_new(level).with_context(|| format!("invalid log filter: {level:?}"))
}
