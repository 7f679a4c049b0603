//! # Main Entry Point
//!
//! Initializes the service using a layered architecture:
//! - Domain: Configuration, Types, Errors
//! - Infrastructure: System runner (programs, metrics, shell)
//! - Application: Registry, Matcher, Code Generator, Executor, Context, Dispatcher
//! - Interface: HTTP routes
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::context::ContextBuffer;
use crate::application::dispatcher::Dispatcher;
use crate::application::executor::Executor;
use crate::application::registry::ActionRegistry;
use crate::domain::config::{AppConfig, LoggingConfig};
use crate::infrastructure::tools::runner::SystemRunner;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "intent-dispatch", about = "Dispatch natural-language prompts to registered actions")]
struct Args {
    /// Config file (defaults to data/config.yaml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,
    /// Override `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let (mut config, config_path, config_found) =
        AppConfig::resolve(args.config.clone(), domain::paths::default_config_path())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // 2. Logging Setup
    let _guard = init_logging(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    let shown_path = config_path.display().to_string();
    if config_found {
        tracing::info!("{}", logs::config_loaded(&shown_path));
    } else {
        tracing::warn!("{}", logs::config_missing(&shown_path));
    }

    // 3. Initialize Components
    let registry = Arc::new(ActionRegistry::builtin()?);
    tracing::info!("{}", logs::registry_loaded(registry.len()));
    tracing::warn!("{}", logs::UNSANDBOXED_WARN);

    let context = Arc::new(ContextBuffer::new(config.dispatch.history_capacity));
    tracing::info!(
        "Context history keeps {} entries (record policy: {:?})",
        context.capacity(),
        config.dispatch.record_policy
    );
    let executor = Executor::new(Arc::new(SystemRunner::new()))
        .with_timeout(config.dispatch.execution_timeout());
    let dispatcher = Arc::new(
        Dispatcher::new(registry, executor, context).with_policy(config.dispatch.record_policy),
    );

    // 4. Serve
    let app = interface::http::build_router(dispatcher);
    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("{}", logs::listening(&addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with error")?;

    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}

/// Console plus a per-session log file. `RUST_LOG` overrides the configured filter.
fn init_logging(logging: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let log_dir = Path::new(&logging.directory);
    if !log_dir.exists() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = log_dir.join(&logging.file);
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, &logging.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
