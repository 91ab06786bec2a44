//! # Project Actor
//!
//! Owns every [`Project`]. Projects have no parent, so the actor runs with `()` context.
//!
//! ```rust
//! use apg_registry::project_actor;
//! use apg_registry::model::ProjectCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = project_actor::new();
//!     tokio::spawn(actor.run(()));
//!
//!     let project = client.create_project("demo", ProjectCreate::default()).await?;
//!     assert_eq!(project.name, "projects/demo");
//!     Ok(())
//! }
//! ```

pub mod entity;

use crate::clients::ProjectClient;
use crate::model::Project;
use registry_framework::ResourceActor;

/// Creates a new Project actor and its client.
pub fn new() -> (ResourceActor<Project>, ProjectClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ProjectClient::new(generic_client))
}
