use anyhow::{Context, Result};
use clap::Parser;
use gitway_core::{SharedMirror, SyncWorker};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod server;

use config::Configuration;
use server::{create_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "gitway")]
#[command(about = "Serve a time-windowed branch graph of a git remote", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Directory holding the visualization page
    #[arg(long, default_value = "www")]
    static_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Preparing repository...");
    let settings = Configuration::load(cli.config.as_deref())?.resolve();
    info!(
        "Mirroring {} into {} every {:?}",
        settings.repository,
        settings.directory.display(),
        settings.fetch_interval
    );

    let mirror = {
        let directory = settings.directory.clone();
        let repository = settings.repository.clone();
        let credentials = settings.credentials.clone();
        tokio::task::spawn_blocking(move || SharedMirror::ensure(directory, repository, credentials))
            .await
            .context("Mirror setup task failed")?
            .context("Failed to prepare repository")?
    };

    SyncWorker::new(mirror.clone(), settings.fetch_interval).spawn();

    let static_dir = if cli.static_dir.is_dir() {
        Some(cli.static_dir.as_path())
    } else {
        warn!("Static directory {} not found, serving the API only", cli.static_dir.display());
        None
    };
    let router = create_router(AppState::new(mirror), static_dir);

    let listener = tokio::net::TcpListener::bind(&cli.listen)
        .await
        .with_context(|| format!("Failed to listen on {}", cli.listen))?;
    info!("Ready to handle requests on http://{}", cli.listen);

    axum::serve(listener, router).await?;
    Ok(())
}
