//! # registry-worker
//!
//! Serves the command-execution endpoint until interrupted.
//!
//! ```bash
//! PORT=8080 APG_REGISTRY_ADDRESS=registry:443 registry-worker
//! ```

use anyhow::Context;
use apg_registry::config::WorkerArgs;
use apg_registry::worker::{MetadataTokenSource, Worker, WorkerServer};
use clap::Parser;
use registry_framework::tracing::setup_tracing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = WorkerArgs::parse();
    setup_tracing();

    let tokens = MetadataTokenSource::new(&args.metadata_host, &args.registry_address)?;
    let worker = Arc::new(Worker::new(tokens));

    let server = WorkerServer::bind(("0.0.0.0", args.port))
        .with_context(|| format!("binding port {}", args.port))?;
    info!(port = args.port, "Starting worker");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    server.serve(worker, cancel).await?;
    Ok(())
}
