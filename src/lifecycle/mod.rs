//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops the registry's actors, and loads registry snapshots.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them in `run(context)`:
//!
//! ```rust,ignore
//! impl ResourceEntity for Project { type Context = (); }
//! impl ResourceEntity for Api     { type Context = ProjectClient; }
//! impl ResourceEntity for Version { type Context = ApiClient; }
//! impl ResourceEntity for Spec    { type Context = VersionClient; }
//! impl ResourceEntity for Artifact { type Context = ArtifactParents; }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - wait for every actor task
//!
//! A child actor holds clones of its parents' clients, so a parent only stops once all of its
//! children have stopped. The wiring is acyclic, so everything terminates.

pub mod registry_system;
pub mod seed;

pub use registry_system::*;
pub use seed::*;
