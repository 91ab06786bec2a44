//! # registry-controller
//!
//! Loads a registry snapshot into an in-process registry, evaluates a manifest against one
//! project and prints one command per line on stdout. Logs go to stderr.
//!
//! ```bash
//! RUST_LOG=info registry-controller --project demo \
//!     --seed demos/registry.yaml --manifest demos/manifest.yaml
//! ```

use anyhow::Context;
use apg_registry::config::ControllerArgs;
use apg_registry::controller::{Controller, Manifest, RegistryStore};
use apg_registry::lifecycle::{RegistrySystem, Seed};
use clap::Parser;
use registry_framework::tracing::setup_tracing;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ControllerArgs::parse();
    setup_tracing();

    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;

    let system = RegistrySystem::new();
    if let Some(path) = &args.seed {
        let seed = Seed::load(path)?;
        let summary = system
            .load_seed(&seed)
            .await
            .with_context(|| format!("loading seed {}", path.display()))?;
        info!(?summary, "Registry ready");
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted");
            on_interrupt.cancel();
        }
    });

    let controller = Controller::new(RegistryStore::from_system(&system), &args.project)
        .with_options(args.options());
    let commands = controller.process_manifest(&manifest, &cancel).await;
    info!(manifest = %manifest.id, actions = commands.len(), "Manifest processed");
    for command in &commands {
        println!("{command}");
    }

    drop(controller);
    system.shutdown().await?;
    Ok(())
}
