use super::ArtifactParents;
use crate::error::RegistryError;
use crate::model::{apply_masked, Artifact, ArtifactCreate, ArtifactName, ArtifactParent, ArtifactUpdate};
use async_trait::async_trait;
use chrono::Utc;
use registry_framework::{FieldMask, ResourceEntity, TypedClient};

#[async_trait]
impl ResourceEntity for Artifact {
    const KIND: &'static str = "artifacts";
    const UPDATABLE_FIELDS: &'static [&'static str] = &["mime_type", "contents"];
    type Create = ArtifactCreate;
    type Update = ArtifactUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ArtifactParents;
    type Error = RegistryError;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "name" => Some(self.name.clone()),
            "mime_type" => Some(self.mime_type.clone()),
            "hash" => Some(self.hash.clone()),
            _ => None,
        }
    }

    fn from_create_params(name: String, params: ArtifactCreate) -> Result<Self, RegistryError> {
        ArtifactName::parse(&name)?;
        Ok(Artifact::new(name, params))
    }

    async fn on_create(&mut self, parents: &ArtifactParents) -> Result<(), RegistryError> {
        let parent = ArtifactName::parse(&self.name)?.parent;
        let key = parent.to_string();
        let found = match parent {
            ArtifactParent::Project(_) => parents.projects.get(key.clone()).await?.is_some(),
            ArtifactParent::Api(_) => parents.apis.get(key.clone()).await?.is_some(),
            ArtifactParent::Version(_) => parents.versions.get(key.clone()).await?.is_some(),
            ArtifactParent::Spec(_) => parents.specs.get(key.clone()).await?.is_some(),
        };
        if found {
            Ok(())
        } else {
            Err(RegistryError::NotFound(key))
        }
    }

    async fn on_update(
        &mut self,
        update: ArtifactUpdate,
        mask: &FieldMask,
        _ctx: &ArtifactParents,
    ) -> Result<(), RegistryError> {
        apply_masked(mask, "mime_type", &mut self.mime_type, update.mime_type);
        if mask.applies("contents", update.contents.is_some()) {
            self.set_contents(update.contents.unwrap_or_default());
        }
        self.update_time = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ArtifactParents) -> Result<(), RegistryError> {
        Ok(())
    }
}
