//! [`ResourceEntity`] implementation for [`Project`].

use crate::error::RegistryError;
use crate::model::{apply_masked, Project, ProjectCreate, ProjectName, ProjectUpdate};
use async_trait::async_trait;
use chrono::Utc;
use registry_framework::{FieldMask, ResourceEntity};

#[async_trait]
impl ResourceEntity for Project {
    const KIND: &'static str = "projects";
    const UPDATABLE_FIELDS: &'static [&'static str] = &["display_name", "description"];
    type Create = ProjectCreate;
    type Update = ProjectUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = RegistryError;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, path: &str) -> Option<String> {
        match path {
            "name" => Some(self.name.clone()),
            "display_name" => Some(self.display_name.clone()),
            "description" => Some(self.description.clone()),
            _ => None,
        }
    }

    fn from_create_params(name: String, params: ProjectCreate) -> Result<Self, RegistryError> {
        ProjectName::parse(&name)?;
        Ok(Project::new(name, params))
    }

    async fn on_update(
        &mut self,
        update: ProjectUpdate,
        mask: &FieldMask,
        _ctx: &(),
    ) -> Result<(), RegistryError> {
        apply_masked(mask, "display_name", &mut self.display_name, update.display_name);
        apply_masked(mask, "description", &mut self.description, update.description);
        self.update_time = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), RegistryError> {
        Ok(())
    }
}
