//! # Api Client
//!
//! High-level API for the `Api` actor.

use super::{found, page_query};
use crate::error::RegistryError;
use crate::model::{api_collection, validate_id, Api, ApiCreate, ApiName, ApiUpdate, ProjectName};
use registry_framework::{FieldMask, FrameworkError, Page, ResourceClient, TypedClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Api actor.
#[derive(Clone)]
pub struct ApiClient {
    inner: ResourceClient<Api>,
}

impl ApiClient {
    pub fn new(inner: ResourceClient<Api>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Api> for ApiClient {
    type Error = RegistryError;

    fn inner(&self) -> &ResourceClient<Api> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RegistryError::from(e)
    }
}

impl ApiClient {
    /// Create `{parent}/apis/{api_id}`. The parent project must exist.
    #[instrument(skip(self))]
    pub async fn create_api(
        &self,
        parent: &str,
        api_id: &str,
        params: ApiCreate,
    ) -> Result<Api, RegistryError> {
        debug!("Sending request");
        validate_id(api_id)?;
        let name = ProjectName::parse(parent)?.api(api_id);
        self.inner
            .create(name.to_string(), params)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_api(&self, name: &str) -> Result<Api, RegistryError> {
        ApiName::parse(name)?;
        found(name, self.get(name.to_string()).await?)
    }

    /// One page of the APIs under `parent`, which may be `projects/-`.
    #[instrument(skip(self))]
    pub async fn list_apis(
        &self,
        parent: &str,
        page_size: i32,
        page_token: Option<String>,
        filter: &str,
    ) -> Result<Page<Api>, RegistryError> {
        let query = page_query(&api_collection(parent)?, page_size, page_token, filter)?;
        self.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn update_api(
        &self,
        name: &str,
        update: ApiUpdate,
        mask: FieldMask,
    ) -> Result<Api, RegistryError> {
        ApiName::parse(name)?;
        self.inner
            .update(name.to_string(), update, mask)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_api(&self, name: &str) -> Result<(), RegistryError> {
        ApiName::parse(name)?;
        self.delete(name.to_string()).await
    }
}
