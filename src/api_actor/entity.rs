//! [`ResourceEntity`] implementation for [`Api`].

use crate::clients::ProjectClient;
use crate::error::RegistryError;
use crate::model::{apply_masked, label_field, Api, ApiCreate, ApiName, ApiUpdate};
use async_trait::async_trait;
use chrono::Utc;
use registry_framework::{FieldMask, ResourceEntity, TypedClient};
use tracing::debug;

#[async_trait]
impl ResourceEntity for Api {
    const KIND: &'static str = "apis";
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "display_name",
        "description",
        "availability",
        "recommended_version",
        "labels",
    ];
    type Create = ApiCreate;
    type Update = ApiUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ProjectClient;
    type Error = RegistryError;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "name" => Some(self.name.clone()),
            "display_name" => Some(self.display_name.clone()),
            "description" => Some(self.description.clone()),
            "availability" => Some(self.availability.clone()),
            "recommended_version" => Some(self.recommended_version.clone()),
            _ => label_field(&self.labels, path),
        }
    }

    fn from_create_params(name: String, params: ApiCreate) -> Result<Self, RegistryError> {
        ApiName::parse(&name)?;
        Ok(Api::new(name, params))
    }

    /// The parent project must exist.
    async fn on_create(&mut self, projects: &ProjectClient) -> Result<(), RegistryError> {
        let parent = ApiName::parse(&self.name)?.parent().to_string();
        debug!(%parent, "Checking parent");
        match projects.get(parent.clone()).await? {
            Some(_) => Ok(()),
            None => Err(RegistryError::NotFound(parent)),
        }
    }

    async fn on_update(
        &mut self,
        update: ApiUpdate,
        mask: &FieldMask,
        _ctx: &ProjectClient,
    ) -> Result<(), RegistryError> {
        apply_masked(mask, "display_name", &mut self.display_name, update.display_name);
        apply_masked(mask, "description", &mut self.description, update.description);
        apply_masked(mask, "availability", &mut self.availability, update.availability);
        apply_masked(
            mask,
            "recommended_version",
            &mut self.recommended_version,
            update.recommended_version,
        );
        apply_masked(mask, "labels", &mut self.labels, update.labels);
        self.update_time = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ProjectClient) -> Result<(), RegistryError> {
        Ok(())
    }
}
