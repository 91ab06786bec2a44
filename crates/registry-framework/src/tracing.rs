//! # Observability
//!
//! Structured logging setup shared by every binary in the workspace.
//!
//! Log lines carry structured fields instead of formatted prose: actors log `kind` and
//! `name`, the controller logs `pattern` and `entry`, the worker logs `command` and
//! `resource`.
//!
//! ```bash
//! RUST_LOG=info registry-controller --project demo --manifest manifest.yaml
//! RUST_LOG=registry_framework=debug,apg_registry=debug registry-controller ...
//! ```
//!
//! With `debug`, actors also log full request payloads:
//!
//! ```text
//! DEBUG Create kind="apis" name=projects/demo/apis/petstore params=ApiCreate { .. }
//! INFO Created kind="apis" name=projects/demo/apis/petstore size=1
//! ```

/// Install the global subscriber: `RUST_LOG` filtering, compact output, no module targets.
///
/// Call once per process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
