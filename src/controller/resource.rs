//! The capability the engine needs from a stored resource: a name and a timestamp.

use crate::model::{Api, Artifact, Spec, Version};
use chrono::{DateTime, Utc};

/// A read-only snapshot of a stored resource.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Fully-qualified resource name.
    fn name(&self) -> &str;

    /// When the resource last changed, as far as staleness is concerned.
    fn update_timestamp(&self) -> DateTime<Utc>;
}

/// Any registry kind that can be a controller target or dependency.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryResource {
    Api(Api),
    Version(Version),
    Spec(Spec),
    Artifact(Artifact),
}

impl Resource for RegistryResource {
    fn name(&self) -> &str {
        match self {
            Self::Api(api) => &api.name,
            Self::Version(version) => &version.name,
            Self::Spec(spec) => &spec.name,
            Self::Artifact(artifact) => &artifact.name,
        }
    }

    /// Specs report their current revision's update time.
    fn update_timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Api(api) => api.update_time,
            Self::Version(version) => version.update_time,
            Self::Spec(spec) => spec.revision_update_time(),
            Self::Artifact(artifact) => artifact.update_time,
        }
    }
}
