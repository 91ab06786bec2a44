//! # Version Client

use super::{found, page_query};
use crate::error::RegistryError;
use crate::model::{
    validate_id, version_collection, ApiName, Version, VersionCreate, VersionName, VersionUpdate,
};
use registry_framework::{FieldMask, FrameworkError, Page, ResourceClient, TypedClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Version actor.
#[derive(Clone)]
pub struct VersionClient {
    inner: ResourceClient<Version>,
}

impl VersionClient {
    pub fn new(inner: ResourceClient<Version>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Version> for VersionClient {
    type Error = RegistryError;

    fn inner(&self) -> &ResourceClient<Version> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RegistryError::from(e)
    }
}

impl VersionClient {
    #[instrument(skip(self))]
    pub async fn create_version(
        &self,
        parent: &str,
        version_id: &str,
        params: VersionCreate,
    ) -> Result<Version, RegistryError> {
        debug!("Sending request");
        validate_id(version_id)?;
        let name = ApiName::parse(parent)?.version(version_id);
        self.inner
            .create(name.to_string(), params)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_version(&self, name: &str) -> Result<Version, RegistryError> {
        VersionName::parse(name)?;
        found(name, self.get(name.to_string()).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_versions(
        &self,
        parent: &str,
        page_size: i32,
        page_token: Option<String>,
        filter: &str,
    ) -> Result<Page<Version>, RegistryError> {
        let query = page_query(&version_collection(parent)?, page_size, page_token, filter)?;
        self.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn update_version(
        &self,
        name: &str,
        update: VersionUpdate,
        mask: FieldMask,
    ) -> Result<Version, RegistryError> {
        VersionName::parse(name)?;
        self.inner
            .update(name.to_string(), update, mask)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_version(&self, name: &str) -> Result<(), RegistryError> {
        VersionName::parse(name)?;
        self.delete(name.to_string()).await
    }
}
