//! The listing seam between the engine and wherever resources live.

use super::error::ControllerError;
use super::resource::{RegistryResource, Resource};
use crate::clients::{ApiClient, ArtifactClient, SpecClient, VersionClient};
use crate::lifecycle::RegistrySystem;
use crate::model::{APIS, ARTIFACTS, SPECS, VERSIONS};
use async_trait::async_trait;
use registry_framework::{ListQuery, TypedClient};
use tracing::{debug, instrument};

/// Lists resources by name pattern and filter.
///
/// The engine only ever lists; it never reads single resources or writes.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    type Resource: Resource;

    /// Every resource matching `pattern` and `filter`, in store order.
    async fn list_resources(
        &self,
        pattern: &str,
        filter: &str,
    ) -> Result<Vec<Self::Resource>, ControllerError>;
}

/// [`ResourceStore`] over the registry's actors.
///
/// The kind to list is chosen by the pattern's last collection (`.../specs/-` lists specs),
/// and all pages are drained.
#[derive(Clone)]
pub struct RegistryStore {
    apis: ApiClient,
    versions: VersionClient,
    specs: SpecClient,
    artifacts: ArtifactClient,
}

impl RegistryStore {
    pub fn new(
        apis: ApiClient,
        versions: VersionClient,
        specs: SpecClient,
        artifacts: ArtifactClient,
    ) -> Self {
        Self {
            apis,
            versions,
            specs,
            artifacts,
        }
    }

    pub fn from_system(system: &RegistrySystem) -> Self {
        Self::new(
            system.api_client.clone(),
            system.version_client.clone(),
            system.spec_client.clone(),
            system.artifact_client.clone(),
        )
    }
}

#[async_trait]
impl ResourceStore for RegistryStore {
    type Resource = RegistryResource;

    #[instrument(skip(self))]
    async fn list_resources(
        &self,
        pattern: &str,
        filter: &str,
    ) -> Result<Vec<RegistryResource>, ControllerError> {
        let query = ListQuery::new(pattern)
            .and_then(|q| q.with_filter(filter))
            .map_err(crate::error::RegistryError::from)?;
        let segments: Vec<&str> = pattern.split('/').collect();
        let collection = segments
            .len()
            .checked_sub(2)
            .map(|i| segments[i])
            .unwrap_or_default();

        let resources: Vec<RegistryResource> = match collection {
            APIS => self
                .apis
                .list_all(query)
                .await?
                .into_iter()
                .map(RegistryResource::Api)
                .collect(),
            VERSIONS => self
                .versions
                .list_all(query)
                .await?
                .into_iter()
                .map(RegistryResource::Version)
                .collect(),
            SPECS => self
                .specs
                .list_all(query)
                .await?
                .into_iter()
                .map(RegistryResource::Spec)
                .collect(),
            ARTIFACTS => self
                .artifacts
                .list_all(query)
                .await?
                .into_iter()
                .map(RegistryResource::Artifact)
                .collect(),
            _ => return Err(ControllerError::UnsupportedCollection(pattern.to_string())),
        };
        debug!(count = resources.len(), "Listed");
        Ok(resources)
    }
}
