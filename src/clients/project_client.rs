//! # Project Client
//!
//! High-level API for the `Project` actor.

use super::{found, page_query};
use crate::error::RegistryError;
use crate::model::{validate_id, Project, ProjectCreate, ProjectName, ProjectUpdate, PROJECTS};
use registry_framework::{FieldMask, FrameworkError, Page, ResourceClient, TypedClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Project actor.
#[derive(Clone)]
pub struct ProjectClient {
    inner: ResourceClient<Project>,
}

impl ProjectClient {
    pub fn new(inner: ResourceClient<Project>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Project> for ProjectClient {
    type Error = RegistryError;

    fn inner(&self) -> &ResourceClient<Project> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RegistryError::from(e)
    }
}

impl ProjectClient {
    #[instrument(skip(self))]
    pub async fn create_project(
        &self,
        project_id: &str,
        params: ProjectCreate,
    ) -> Result<Project, RegistryError> {
        debug!("Sending request");
        validate_id(project_id)?;
        let name = format!("{PROJECTS}/{project_id}");
        self.inner.create(name, params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, name: &str) -> Result<Project, RegistryError> {
        ProjectName::parse(name)?;
        found(name, self.get(name.to_string()).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_projects(
        &self,
        page_size: i32,
        page_token: Option<String>,
        filter: &str,
    ) -> Result<Page<Project>, RegistryError> {
        let query = page_query(&format!("{PROJECTS}/-"), page_size, page_token, filter)?;
        self.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn update_project(
        &self,
        name: &str,
        update: ProjectUpdate,
        mask: FieldMask,
    ) -> Result<Project, RegistryError> {
        ProjectName::parse(name)?;
        self.inner
            .update(name.to_string(), update, mask)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&self, name: &str) -> Result<(), RegistryError> {
        ProjectName::parse(name)?;
        self.delete(name.to_string()).await
    }
}
