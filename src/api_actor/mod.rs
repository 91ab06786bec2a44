//! # Api Actor
//!
//! Owns every [`Api`]. Runs with the [`ProjectClient`] as context so creation can check that
//! the parent project exists.

pub mod entity;

use crate::clients::ApiClient;
use crate::model::Api;
use registry_framework::ResourceActor;

/// Creates a new Api actor and its client. Start it with `actor.run(project_client)`.
pub fn new() -> (ResourceActor<Api>, ApiClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ApiClient::new(generic_client))
}
