//! # Artifact Actor
//!
//! Owns every [`Artifact`]. An artifact may hang off any other kind, so the actor's context
//! carries a client for each of them ([`ArtifactParents`]).

pub mod entity;

use crate::clients::{ApiClient, ArtifactClient, ProjectClient, SpecClient, VersionClient};
use crate::model::Artifact;
use registry_framework::ResourceActor;

/// Clients used to check that an artifact's parent exists.
#[derive(Clone)]
pub struct ArtifactParents {
    pub projects: ProjectClient,
    pub apis: ApiClient,
    pub versions: VersionClient,
    pub specs: SpecClient,
}

/// Creates a new Artifact actor and its client. Start it with `actor.run(parents)`.
pub fn new() -> (ResourceActor<Artifact>, ArtifactClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ArtifactClient::new(generic_client))
}
