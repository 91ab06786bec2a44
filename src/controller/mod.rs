//! # Controller
//!
//! Decides which derived resources are missing or out of date, and emits one shell command
//! per resource to (re)generate it. The controller never runs those commands.
//!
//! A [`Manifest`] lists generation rules. Each rule names a target pattern, the patterns of
//! the resources the target is derived from, and a command template:
//!
//! ```yaml
//! id: lint
//! generated_resources:
//!   - pattern: apis/-/versions/-/specs/-/artifacts/lint
//!     dependencies:
//!       - pattern: $resource.spec
//!     action: registry compute lint $0
//! ```
//!
//! ## Grouping
//!
//! `$resource.spec` refers to the spec that owns the target. Targets and dependency
//! resources are matched through a *group key*: the name prefix up to and including the
//! referenced entity (`projects/p/apis/a/versions/v/specs/s`). Patterns without a reference
//! all share the group `default`.
//!
//! ## Staleness
//!
//! A target is stale when some resource in any of its dependency groups was updated strictly
//! after it. A group of the first dependency with no target at all gets a creation action.
//! Either action fires only when every dependency has a group for that key.
//!
//! ## Failure Isolation
//!
//! Each manifest entry is evaluated on its own; a broken entry is logged and skipped. See
//! [`ControllerOptions`] for how failing dependencies are treated.

pub mod actions;
pub mod dependency;
pub mod error;
pub mod manifest;
pub mod patterns;
pub mod processor;
pub mod resource;
pub mod store;

pub use actions::generate_actions;
pub use dependency::{group_resources, DependencyMap, ResourceCollection};
pub use error::ControllerError;
pub use manifest::{Dependency, GeneratedResource, Manifest};
pub use patterns::{extend_pattern, extract_group, generate_command, Entity};
pub use processor::{Controller, ControllerOptions};
pub use resource::{RegistryResource, Resource};
pub use store::{RegistryStore, ResourceStore};
