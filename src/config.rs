//! Command-line configuration for the two binaries.
//!
//! Every flag can also be set through the environment variable named next to it.

use crate::controller::ControllerOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Prints the commands that would bring a project's derived resources up to date.
#[derive(Debug, Parser)]
#[command(name = "registry-controller")]
#[command(version)]
#[command(about = "Compute registry actions from a manifest", long_about = None)]
pub struct ControllerArgs {
    /// Project whose resources are evaluated
    #[arg(long, env = "APG_PROJECT")]
    pub project: String,

    /// Manifest file (YAML)
    #[arg(long, env = "APG_MANIFEST")]
    pub manifest: PathBuf,

    /// Registry snapshot (YAML) loaded before evaluation
    #[arg(long, env = "APG_SEED")]
    pub seed: Option<PathBuf>,

    /// Skip a whole manifest entry when one of its dependencies cannot be listed
    #[arg(long)]
    pub strict_dependencies: bool,

    /// Give up on a single listing after this many seconds
    #[arg(long, env = "APG_LIST_TIMEOUT_SECS")]
    pub list_timeout_secs: Option<u64>,
}

impl ControllerArgs {
    pub fn options(&self) -> ControllerOptions {
        ControllerOptions {
            strict_dependencies: self.strict_dependencies,
            list_timeout: self.list_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Runs commands posted by controllers.
#[derive(Debug, Parser)]
#[command(name = "registry-worker")]
#[command(version)]
#[command(about = "Execute registry commands over HTTP", long_about = None)]
pub struct WorkerArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Registry address used as the identity token audience
    #[arg(long, env = "APG_REGISTRY_ADDRESS", default_value = "")]
    pub registry_address: String,

    /// Metadata service host
    #[arg(long, env = "GCE_METADATA_HOST", default_value = "metadata.google.internal")]
    pub metadata_host: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_flags_map_to_options() {
        let args = ControllerArgs::try_parse_from([
            "registry-controller",
            "--project",
            "demo",
            "--manifest",
            "manifest.yaml",
            "--strict-dependencies",
            "--list-timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(args.project, "demo");
        assert!(args.seed.is_none());
        assert_eq!(
            args.options(),
            ControllerOptions {
                strict_dependencies: true,
                list_timeout: Some(Duration::from_secs(30)),
            }
        );
    }

    #[test]
    fn worker_defaults() {
        let args = WorkerArgs::try_parse_from(["registry-worker", "--registry-address", "r:443"])
            .unwrap();
        assert_eq!(args.registry_address, "r:443");
        // PORT and GCE_METADATA_HOST may be set in the test environment.
        if std::env::var_os("PORT").is_none() {
            assert_eq!(args.port, 8080);
        }
        if std::env::var_os("GCE_METADATA_HOST").is_none() {
            assert_eq!(args.metadata_host, "metadata.google.internal");
        }
    }
}
