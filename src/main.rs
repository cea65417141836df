use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::info;

mod cli;

use cli::Cli;
use ytsum::config::{Config, ResponseMode};
use ytsum::server::{AppState, create_router};
use ytsum::summarize::Summarizer;
use ytsum::title::TitleResolver;
use ytsum::youtube::TranscriptResolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    // CLI flags take priority over the config file
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if !cli.languages.is_empty() {
        config.languages = cli.languages.clone();
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    // Every outbound call shares one client with an explicit timeout
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let summarizer = match config.mode {
        ResponseMode::Transcript => None,
        ResponseMode::Summary | ResponseMode::Both => {
            Some(Arc::new(Summarizer::from_env(client.clone(), &config)?))
        }
    };

    let state = AppState {
        mode: config.mode,
        titles: Arc::new(TitleResolver::new(client.clone())),
        transcripts: Arc::new(TranscriptResolver::new(client, config.languages.clone())),
        summarizer,
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .wrap_err("invalid bind address")?;

    info!("Listening on {addr} (mode: {})", config.mode);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Received shutdown signal");
}
