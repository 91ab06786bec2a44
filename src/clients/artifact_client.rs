//! # Artifact Client

use super::{found, page_query};
use crate::error::RegistryError;
use crate::model::{
    artifact_collection, validate_id, Artifact, ArtifactCreate, ArtifactName, ArtifactParent,
    ArtifactUpdate,
};
use registry_framework::{FieldMask, FrameworkError, Page, ResourceClient, TypedClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Artifact actor.
#[derive(Clone)]
pub struct ArtifactClient {
    inner: ResourceClient<Artifact>,
}

impl ArtifactClient {
    pub fn new(inner: ResourceClient<Artifact>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Artifact> for ArtifactClient {
    type Error = RegistryError;

    fn inner(&self) -> &ResourceClient<Artifact> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RegistryError::from(e)
    }
}

impl ArtifactClient {
    /// Create `{parent}/artifacts/{artifact_id}` under a project, API, version or spec.
    #[instrument(skip(self, params), fields(mime_type = %params.mime_type))]
    pub async fn create_artifact(
        &self,
        parent: &str,
        artifact_id: &str,
        params: ArtifactCreate,
    ) -> Result<Artifact, RegistryError> {
        debug!("Sending request");
        validate_id(artifact_id)?;
        let name = ArtifactName {
            parent: ArtifactParent::parse(parent)?,
            artifact: artifact_id.to_string(),
        };
        self.inner
            .create(name.to_string(), params)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_artifact(&self, name: &str) -> Result<Artifact, RegistryError> {
        ArtifactName::parse(name)?;
        found(name, self.get(name.to_string()).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_artifacts(
        &self,
        parent: &str,
        page_size: i32,
        page_token: Option<String>,
        filter: &str,
    ) -> Result<Page<Artifact>, RegistryError> {
        let query = page_query(&artifact_collection(parent)?, page_size, page_token, filter)?;
        self.list(query).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_artifact(
        &self,
        name: &str,
        update: ArtifactUpdate,
        mask: FieldMask,
    ) -> Result<Artifact, RegistryError> {
        ArtifactName::parse(name)?;
        self.inner
            .update(name.to_string(), update, mask)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_artifact(&self, name: &str) -> Result<(), RegistryError> {
        ArtifactName::parse(name)?;
        self.delete(name.to_string()).await
    }
}
