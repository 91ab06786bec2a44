//! # Spec Actor
//!
//! Owns every [`Spec`] together with its revision history. Besides CRUD it answers the
//! revision-aware reads in [`SpecAction`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ResourceEntity`](registry_framework::ResourceEntity) implementation
//! - [`actions`] - [`SpecAction`] / [`SpecActionResult`]

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::SpecClient;
use crate::model::Spec;
use registry_framework::ResourceActor;

/// Creates a new Spec actor and its client. Start it with `actor.run(version_client)`.
pub fn new() -> (ResourceActor<Spec>, SpecClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, SpecClient::new(generic_client))
}
