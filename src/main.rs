//! Taskboard server
//!
//! Loads configuration, opens the JSON file stores, and serves the HTTP
//! API until interrupted.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use taskboard::api::{build_router, AppState};
use taskboard::cli::Cli;
use taskboard::config::Config;
use taskboard::repo::{JsonTaskListRepository, JsonTaskRepository};
use taskboard::service::{TaskListService, TaskService};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;
    if let Some(data_dir) = &cli.data_dir {
        config.server.data_dir = data_dir.into();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    run_server(config).await
}

/// Open the stores, wire the services, and serve until ctrl-c.
async fn run_server(config: Config) -> Result<()> {
    config.ensure_data_dir()?;

    info!("Starting taskboard v{}", env!("CARGO_PKG_VERSION"));
    info!("Task list store: {:?}", config.lists_path());
    info!("Task store: {:?}", config.tasks_path());

    let lists: Arc<dyn taskboard::repo::TaskListRepository> =
        Arc::new(JsonTaskListRepository::open(config.lists_path()));
    let tasks: Arc<dyn taskboard::repo::TaskRepository> =
        Arc::new(JsonTaskRepository::open(config.tasks_path()));

    let state = AppState::new(
        Arc::new(TaskListService::new(Arc::clone(&lists), Arc::clone(&tasks))),
        Arc::new(TaskService::new(tasks, lists)),
    );
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
