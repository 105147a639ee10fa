//! tutorial_server
//!
//! A small JSON API over hyper: items, model metadata, a bundled JSON document,
//! file upload and a paginated name list, with field-level input validation.

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod models;
mod routing;
mod server;
mod validation;

use clap::Parser;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "tutorial_server", version, about = "Tutorial JSON API server")]
struct Cli {
    /// Configuration file path without extension (`config` loads `config.toml`)
    #[arg(short, long, env = "TUTORIAL_CONFIG", default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::Config::load_from(&cli.config)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&listener.local_addr()?, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::run_server_loop(listener, state, signals).await
}
