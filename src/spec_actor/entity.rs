//! [`ResourceEntity`] implementation for [`Spec`].
//!
//! Updates always refresh the current revision's timestamp; contents with a new hash start a
//! new revision instead.

use super::actions::{SpecAction, SpecActionResult};
use crate::clients::VersionClient;
use crate::error::RegistryError;
use crate::model::{apply_masked, label_field, Spec, SpecCreate, SpecName, SpecUpdate};
use async_trait::async_trait;
use chrono::Utc;
use registry_framework::{FieldMask, ResourceEntity, TypedClient};

#[async_trait]
impl ResourceEntity for Spec {
    const KIND: &'static str = "specs";
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "filename",
        "description",
        "mime_type",
        "source_uri",
        "labels",
        "contents",
    ];
    type Create = SpecCreate;
    type Update = SpecUpdate;
    type Action = SpecAction;
    type ActionResult = SpecActionResult;
    type Context = VersionClient;
    type Error = RegistryError;

    fn name(&self) -> &str {
        &self.name
    }

    fn notification_name(&self) -> String {
        self.revision_name()
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "name" => Some(self.name.clone()),
            "filename" => Some(self.filename.clone()),
            "description" => Some(self.description.clone()),
            "mime_type" => Some(self.mime_type.clone()),
            "source_uri" => Some(self.source_uri.clone()),
            "revision_id" => Some(self.revision.revision_id.clone()),
            "hash" => Some(self.revision.hash.clone()),
            _ => label_field(&self.labels, path),
        }
    }

    fn from_create_params(name: String, params: SpecCreate) -> Result<Self, RegistryError> {
        let parsed = SpecName::parse(&name)?;
        if parsed.revision.is_some() {
            return Err(RegistryError::InvalidArgument(format!(
                "invalid spec name {name:?}: revisions cannot be created directly"
            )));
        }
        Ok(Spec::new(name, params))
    }

    async fn on_create(&mut self, versions: &VersionClient) -> Result<(), RegistryError> {
        let parent = SpecName::parse(&self.name)?.parent().to_string();
        match versions.get(parent.clone()).await? {
            Some(_) => Ok(()),
            None => Err(RegistryError::NotFound(parent)),
        }
    }

    async fn on_update(
        &mut self,
        update: SpecUpdate,
        mask: &FieldMask,
        _ctx: &VersionClient,
    ) -> Result<(), RegistryError> {
        let now = Utc::now();
        apply_masked(mask, "filename", &mut self.filename, update.filename);
        apply_masked(mask, "description", &mut self.description, update.description);
        apply_masked(mask, "mime_type", &mut self.mime_type, update.mime_type);
        apply_masked(mask, "source_uri", &mut self.source_uri, update.source_uri);
        apply_masked(mask, "labels", &mut self.labels, update.labels);
        if mask.applies("contents", update.contents.is_some()) {
            self.commit_contents(update.contents.unwrap_or_default(), now);
        }
        self.touch_revision(now);
        self.update_time = now;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SpecAction,
        _ctx: &VersionClient,
    ) -> Result<SpecActionResult, RegistryError> {
        match action {
            SpecAction::GetRevision(revision) => self
                .as_of(&revision)
                .map(SpecActionResult::Revision)
                .ok_or_else(|| RegistryError::NotFound(format!("{}@{revision}", self.name))),
            SpecAction::ListRevisions => Ok(SpecActionResult::Revisions(self.revisions())),
            SpecAction::GetContents(revision) => {
                let view = match revision {
                    Some(revision) => self.as_of(&revision).ok_or_else(|| {
                        RegistryError::NotFound(format!("{}@{revision}", self.name))
                    })?,
                    None => self.clone(),
                };
                view.revision.contents().map(SpecActionResult::Contents)
            }
        }
    }
}
