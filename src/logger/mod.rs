//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Diagnostic logging through `tracing`
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - File-based access log support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Initialize diagnostics and the access log writer
///
/// Should be called once at application startup. `RUST_LOG` overrides the
/// configured level.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|e| e.to_string())?;

    writer::init(config.logging.access_log_file.as_deref())?;
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Server started, listening on http://{addr}");
    tracing::info!(level = %config.logging.level, "Log filter");
    if let Some(workers) = config.server.workers {
        tracing::info!(workers, "Worker threads");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!(max, "Connection limit");
    }
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!(path = %path, "Access log");
    }
    tracing::info!(base_dir = %config.data.base_dir.display(), "Data directory");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(%peer_addr, "Connection accepted");
}

pub fn log_connection_rejected(peer_addr: &SocketAddr, limit: u64) {
    tracing::warn!(%peer_addr, limit, "Connection limit reached, rejecting");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_accept_error(err: &std::io::Error) {
    tracing::error!("Failed to accept connection: {err}");
}

pub fn log_shutdown_started(active: usize) {
    tracing::info!(active, "Shutdown signal received, draining connections");
}

pub fn log_shutdown_complete() {
    tracing::info!("Server stopped");
}

pub fn log_shutdown_timeout(remaining: usize) {
    tracing::warn!(remaining, "Shutdown timeout elapsed with connections still open");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}
