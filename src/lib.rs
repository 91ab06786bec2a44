#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # API Registry
//!
//! > **An in-memory API registry, a controller that keeps derived resources fresh, and a
//! > worker that runs what the controller asks for.**
//!
//! ## 🏗️ Design
//!
//! The registry stores a hierarchy of resources:
//!
//! ```text
//! projects/{project}
//!   apis/{api}
//!     versions/{version}
//!       specs/{spec}[@{revision}]
//! {any of the above}/artifacts/{artifact}
//! ```
//!
//! Each kind is owned by one actor built from
//! [`registry_framework::ResourceActor`]. Actors process requests one at a time, so entity
//! state needs no locks, while different kinds run in parallel.
//!
//! The controller reads the registry, compares update times of derived resources with the
//! resources they depend on, and emits commands for whatever is stale or missing. It never
//! writes to the registry itself; the commands do that, usually through a worker.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Resources ([`model`])
//! Resource types, their create/update payloads and name parsing.
//! - **Key items**: [`SpecName`](model::SpecName), [`Spec`](model::Spec),
//!   [`ArtifactParent`](model::ArtifactParent).
//!
//! ### 2. The Actors ([`project_actor`], [`api_actor`], [`version_actor`], [`spec_actor`], [`artifact_actor`])
//! [`ResourceEntity`](registry_framework::ResourceEntity) implementations. Child kinds check
//! that their parent exists before anything is created.
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients per kind: parent + id addressing, pagination, field masks, spec revisions.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`RegistrySystem`](lifecycle::RegistrySystem) starts and wires the actors, loads YAML
//! snapshots and shuts everything down. [`subscribe`](lifecycle::RegistrySystem::subscribe)
//! streams every create, update and delete.
//!
//! ### 5. The Controller ([`controller`])
//! [`Controller::process_manifest`](controller::Controller::process_manifest) turns a
//! [`Manifest`](controller::Manifest) into commands.
//!
//! ### 6. The Worker ([`worker`])
//! HTTP endpoint that executes one command per request.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run --bin registry-controller -- \
//!     --project demo --seed demos/registry.yaml --manifest demos/manifest.yaml
//!
//! RUST_LOG=info cargo run --bin registry-worker -- --port 8080
//! ```

pub mod api_actor;
pub mod artifact_actor;
pub mod clients;
pub mod config;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod project_actor;
pub mod spec_actor;
pub mod version_actor;
pub mod worker;
