//! # Version Actor
//!
//! Owns every [`Version`]. Context is the [`ApiClient`](crate::clients::ApiClient) used for
//! the parent check.

pub mod entity;

use crate::clients::VersionClient;
use crate::model::Version;
use registry_framework::ResourceActor;

/// Creates a new Version actor and its client. Start it with `actor.run(api_client)`.
pub fn new() -> (ResourceActor<Version>, VersionClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, VersionClient::new(generic_client))
}
