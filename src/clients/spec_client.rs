//! # Spec Client
//!
//! High-level API for the `Spec` actor, including revision reads and contents.
//! Names passed to the read methods may carry an `@revision` suffix.

use super::{found, page_query};
use crate::error::RegistryError;
use crate::model::{
    spec_collection, validate_id, Spec, SpecContents, SpecCreate, SpecName, SpecUpdate,
    VersionName,
};
use crate::spec_actor::{SpecAction, SpecActionResult};
use registry_framework::{FieldMask, FrameworkError, Page, ResourceClient, TypedClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Spec actor.
#[derive(Clone)]
pub struct SpecClient {
    inner: ResourceClient<Spec>,
}

impl SpecClient {
    pub fn new(inner: ResourceClient<Spec>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TypedClient<Spec> for SpecClient {
    type Error = RegistryError;

    fn inner(&self) -> &ResourceClient<Spec> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RegistryError::from(e)
    }
}

fn unexpected(action: &str) -> RegistryError {
    RegistryError::Internal(format!("spec actor answered {action} with the wrong result"))
}

impl SpecClient {
    #[instrument(skip(self, params), fields(mime_type = %params.mime_type))]
    pub async fn create_spec(
        &self,
        parent: &str,
        spec_id: &str,
        params: SpecCreate,
    ) -> Result<Spec, RegistryError> {
        debug!("Sending request");
        validate_id(spec_id)?;
        let name = VersionName::parse(parent)?.spec(spec_id);
        self.inner
            .create(name.to_string(), params)
            .await
            .map_err(Self::map_error)
    }

    /// Fetch a spec. `name@revision` returns the spec as of that revision.
    #[instrument(skip(self))]
    pub async fn get_spec(&self, name: &str) -> Result<Spec, RegistryError> {
        let parsed = SpecName::parse(name)?;
        let base = parsed.without_revision().to_string();
        let Some(revision) = parsed.revision else {
            return found(name, self.get(base).await?);
        };
        match self.action(base, SpecAction::GetRevision(revision)).await? {
            SpecActionResult::Revision(spec) => Ok(spec),
            _ => Err(unexpected("GetRevision")),
        }
    }

    /// Contents of the current revision, or of the named one. `+gzip` contents are inflated.
    #[instrument(skip(self))]
    pub async fn get_spec_contents(&self, name: &str) -> Result<SpecContents, RegistryError> {
        let parsed = SpecName::parse(name)?;
        let base = parsed.without_revision().to_string();
        match self.action(base, SpecAction::GetContents(parsed.revision)).await? {
            SpecActionResult::Contents(contents) => Ok(contents),
            _ => Err(unexpected("GetContents")),
        }
    }

    /// Every revision of a spec, newest first.
    #[instrument(skip(self))]
    pub async fn list_spec_revisions(&self, name: &str) -> Result<Vec<Spec>, RegistryError> {
        let base = SpecName::parse(name)?.without_revision().to_string();
        match self.action(base, SpecAction::ListRevisions).await? {
            SpecActionResult::Revisions(revisions) => Ok(revisions),
            _ => Err(unexpected("ListRevisions")),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_specs(
        &self,
        parent: &str,
        page_size: i32,
        page_token: Option<String>,
        filter: &str,
    ) -> Result<Page<Spec>, RegistryError> {
        let query = page_query(&spec_collection(parent)?, page_size, page_token, filter)?;
        self.list(query).await
    }

    /// Update a spec. With `allow_missing`, a missing spec is created from `update`.
    #[instrument(skip(self, update))]
    pub async fn update_spec(
        &self,
        name: &str,
        update: SpecUpdate,
        mask: FieldMask,
        allow_missing: bool,
    ) -> Result<Spec, RegistryError> {
        let parsed = SpecName::parse(name)?;
        if parsed.revision.is_some() {
            return Err(RegistryError::InvalidArgument(format!(
                "invalid spec name {name:?}: revisions cannot be updated"
            )));
        }
        if allow_missing && self.get(name.to_string()).await?.is_none() {
            info!("Spec missing, creating it");
            return self
                .create_spec(&parsed.parent().to_string(), &parsed.spec, update.into())
                .await;
        }
        self.inner
            .update(name.to_string(), update, mask)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_spec(&self, name: &str) -> Result<(), RegistryError> {
        let parsed = SpecName::parse(name)?;
        if parsed.revision.is_some() {
            return Err(RegistryError::InvalidArgument(format!(
                "invalid spec name {name:?}: delete the spec, not a revision"
            )));
        }
        self.delete(name.to_string()).await
    }

    async fn action(
        &self,
        name: String,
        action: SpecAction,
    ) -> Result<SpecActionResult, RegistryError> {
        self.inner
            .perform_action(name, action)
            .await
            .map_err(Self::map_error)
    }
}
