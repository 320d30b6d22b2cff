//! keywebhookd: fires webhooks from global keyboard shortcuts
//!
//! A background daemon that polls global key state and, when every key of a
//! registered combination is held, issues the configured HTTP request.
//!
//! - Shortcuts come from a JSON config document, validated in full at startup
//! - One dedicated worker thread runs the sample-match-dispatch loop
//! - Dispatch outcomes are classified and surfaced per shortcut
//! - SIGTERM/SIGINT stop the worker cooperatively at a tick boundary

mod config;
mod dispatch;
mod lifecycle;
mod matcher;
mod registry;
mod report;
mod sampler;
mod worker;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::dispatch::WebhookDispatcher;
use crate::lifecycle::{InstanceLock, ShutdownFlag, ShutdownSignal};
use crate::report::{ErrorSink, LogErrorSink};
use crate::worker::{Worker, WorkerOptions};

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "keywebhookd starting"
    );

    let errors = LogErrorSink;

    // Refuse to run alongside another instance. Fatal startup errors return
    // from main so the lock file is released on the way out; the process
    // still exits with code 1.
    let _instance = match InstanceLock::acquire(InstanceLock::default_path()) {
        Ok(lock) => lock,
        Err(e) => {
            errors.report(&e.to_string());
            return Err(e.into());
        }
    };

    // Load configuration; no partial startup, the whole document is valid
    // or the process exits before the worker is created
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path.display(), "invalid configuration");
            errors.report(&format!("configuration error: {e}"));
            return Err(e.into());
        }
    };
    let Config {
        registry,
        poll_interval,
        cooldown,
    } = config;
    info!(
        shortcuts = registry.len(),
        path = %config_path.display(),
        ?poll_interval,
        ?cooldown,
        "configuration loaded"
    );

    // Start the worker on its dedicated thread
    let shutdown = ShutdownFlag::new();
    let worker = Worker::new(
        Arc::new(registry),
        sampler::host_sampler(),
        WebhookDispatcher::new(),
        LogErrorSink,
        WorkerOptions {
            poll_interval,
            cooldown,
        },
    );
    let handle = match worker.spawn(shutdown.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            errors.report(&e.to_string());
            return Err(e.into());
        }
    };

    info!("daemon initialized, watching for shortcuts");

    // Wait for shutdown signal
    ShutdownSignal::new().wait().await;
    info!("shutdown signal received");

    // Ask the worker to stop at the next tick boundary, then wait for it
    shutdown.trigger();
    if handle.join().is_err() {
        warn!("worker thread panicked");
    }

    info!("keywebhookd stopped");

    Ok(())
}
