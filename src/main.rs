//! # Main Entry Point
//!
//! Initializes the business application generator:
//! - Domain: Configuration, Types and Traits
//! - Application: Step registry, Navigation, Assembly, Generation, Launch
//! - Infrastructure: HTTP transport, Archive sink, Console host
//! - Interface: Wizard and quick generate command handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::generation::GenerationClient;
use crate::application::launch::LaunchController;
use crate::application::steps::StepRegistry;
use crate::domain::config::AppConfig;
use crate::infrastructure::console::ConsoleHost;
use crate::infrastructure::files::ArchiveSink;
use crate::infrastructure::http::HttpTransport;
use crate::interface::commands;

#[derive(Parser, Debug)]
#[command(name = "bizapp-wizard", version, about = "Generate business applications from the terminal")]
struct Cli {
    /// Configuration file (defaults to data/config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory generated archives are saved into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base URL of the generation service
    #[arg(long)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Walk through the configuration wizard
    Wizard,
    /// Generate the preconfigured application right away
    Quick,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.service_url {
        config.service.base_url = url.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.display().to_string());
    }

    // 2. Logging Setup
    fs::create_dir_all(&config.logging.directory)
        .with_context(|| format!("Failed to create {}", config.logging.directory))?;
    let file_appender =
        tracing_appender::rolling::never(&config.logging.directory, &config.logging.file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", strings::logs::STARTUP);

    // 3. Infrastructure
    let transport = Arc::new(HttpTransport::new(&config.service)?);
    tracing::info!("{}", strings::logs::config_loaded(transport.url()));
    let host = Arc::new(ConsoleHost::new(ArchiveSink::new(config.output.resolve_dir())));

    // 4. Application
    let launch = LaunchController::new(
        Arc::new(StepRegistry::standard()),
        Arc::new(GenerationClient::new(transport)),
        host.clone(),
    );

    // 5. Dispatch
    match cli.command {
        Command::Wizard => {
            commands::wizard::run(launch.open_wizard(), &host).await?;
            tracing::debug!("{} wizard listeners outstanding", launch.listener_count());
            Ok(ExitCode::SUCCESS)
        }
        Command::Quick => {
            if commands::quick::handle_quick(&launch, &host).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
