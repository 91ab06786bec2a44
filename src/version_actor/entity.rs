use crate::clients::ApiClient;
use crate::error::RegistryError;
use crate::model::{apply_masked, label_field, Version, VersionCreate, VersionName, VersionUpdate};
use async_trait::async_trait;
use chrono::Utc;
use registry_framework::{FieldMask, ResourceEntity, TypedClient};

#[async_trait]
impl ResourceEntity for Version {
    const KIND: &'static str = "versions";
    const UPDATABLE_FIELDS: &'static [&'static str] =
        &["display_name", "description", "state", "labels"];
    type Create = VersionCreate;
    type Update = VersionUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ApiClient;
    type Error = RegistryError;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "name" => Some(self.name.clone()),
            "display_name" => Some(self.display_name.clone()),
            "description" => Some(self.description.clone()),
            "state" => Some(self.state.clone()),
            _ => label_field(&self.labels, path),
        }
    }

    fn from_create_params(name: String, params: VersionCreate) -> Result<Self, RegistryError> {
        VersionName::parse(&name)?;
        Ok(Version::new(name, params))
    }

    async fn on_create(&mut self, apis: &ApiClient) -> Result<(), RegistryError> {
        let parent = VersionName::parse(&self.name)?.parent().to_string();
        match apis.get(parent.clone()).await? {
            Some(_) => Ok(()),
            None => Err(RegistryError::NotFound(parent)),
        }
    }

    async fn on_update(
        &mut self,
        update: VersionUpdate,
        mask: &FieldMask,
        _ctx: &ApiClient,
    ) -> Result<(), RegistryError> {
        apply_masked(mask, "display_name", &mut self.display_name, update.display_name);
        apply_masked(mask, "description", &mut self.description, update.description);
        apply_masked(mask, "state", &mut self.state, update.state);
        apply_masked(mask, "labels", &mut self.labels, update.labels);
        self.update_time = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &ApiClient) -> Result<(), RegistryError> {
        Ok(())
    }
}
