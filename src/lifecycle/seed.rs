//! Registry snapshots loaded from YAML.
//!
//! ```yaml
//! projects:
//!   - id: demo
//!     apis:
//!       - id: petstore
//!         versions:
//!           - id: v1
//!             specs:
//!               - id: openapi.yaml
//!                 mime_type: application/x.openapi
//!                 contents: |
//!                   openapi: 3.0.0
//! ```

use super::RegistrySystem;
use crate::error::RegistryError;
use crate::model::{
    ApiCreate, ArtifactCreate, Labels, ProjectCreate, SpecCreate, VersionCreate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub projects: Vec<SeedProject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedProject {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub apis: Vec<SeedApi>,
    pub artifacts: Vec<SeedArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedApi {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub availability: String,
    pub recommended_version: String,
    pub labels: Labels,
    pub versions: Vec<SeedVersion>,
    pub artifacts: Vec<SeedArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedVersion {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub state: String,
    pub labels: Labels,
    pub specs: Vec<SeedSpec>,
    pub artifacts: Vec<SeedArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSpec {
    pub id: String,
    pub filename: String,
    pub description: String,
    pub mime_type: String,
    pub source_uri: String,
    pub labels: Labels,
    /// Text contents, stored as UTF-8 bytes.
    pub contents: String,
    pub artifacts: Vec<SeedArtifact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedArtifact {
    pub id: String,
    pub mime_type: String,
    pub contents: String,
}

impl Seed {
    pub fn from_yaml(source: &str) -> Result<Self, RegistryError> {
        serde_yaml::from_str(source)
            .map_err(|e| RegistryError::InvalidArgument(format!("invalid seed: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::InvalidArgument(format!("cannot read seed {}: {e}", path.display()))
        })?;
        Self::from_yaml(&source)
    }
}

/// Count of resources created by [`RegistrySystem::load_seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub apis: usize,
    pub versions: usize,
    pub specs: usize,
    pub artifacts: usize,
}

impl RegistrySystem {
    /// Create every resource of `seed`, parents before children.
    ///
    /// Stops at the first failure; resources created before it stay in place.
    pub async fn load_seed(&self, seed: &Seed) -> Result<SeedSummary, RegistryError> {
        let mut summary = SeedSummary::default();
        for project in &seed.projects {
            let created = self
                .project_client
                .create_project(
                    &project.id,
                    ProjectCreate {
                        display_name: project.display_name.clone(),
                        description: project.description.clone(),
                    },
                )
                .await?;
            summary.projects += 1;
            self.seed_artifacts(&created.name, &project.artifacts, &mut summary)
                .await?;

            for api in &project.apis {
                let created = self
                    .api_client
                    .create_api(
                        &created.name,
                        &api.id,
                        ApiCreate {
                            display_name: api.display_name.clone(),
                            description: api.description.clone(),
                            availability: api.availability.clone(),
                            recommended_version: api.recommended_version.clone(),
                            labels: api.labels.clone(),
                        },
                    )
                    .await?;
                summary.apis += 1;
                self.seed_artifacts(&created.name, &api.artifacts, &mut summary)
                    .await?;

                for version in &api.versions {
                    self.seed_version(&created.name, version, &mut summary)
                        .await?;
                }
            }
        }
        info!(?summary, "Seed loaded");
        Ok(summary)
    }

    async fn seed_version(
        &self,
        api: &str,
        version: &SeedVersion,
        summary: &mut SeedSummary,
    ) -> Result<(), RegistryError> {
        let created = self
            .version_client
            .create_version(
                api,
                &version.id,
                VersionCreate {
                    display_name: version.display_name.clone(),
                    description: version.description.clone(),
                    state: version.state.clone(),
                    labels: version.labels.clone(),
                },
            )
            .await?;
        summary.versions += 1;
        self.seed_artifacts(&created.name, &version.artifacts, summary)
            .await?;

        for spec in &version.specs {
            let created_spec = self
                .spec_client
                .create_spec(
                    &created.name,
                    &spec.id,
                    SpecCreate {
                        filename: spec.filename.clone(),
                        description: spec.description.clone(),
                        mime_type: spec.mime_type.clone(),
                        source_uri: spec.source_uri.clone(),
                        labels: spec.labels.clone(),
                        contents: spec.contents.clone().into_bytes(),
                    },
                )
                .await?;
            summary.specs += 1;
            self.seed_artifacts(&created_spec.name, &spec.artifacts, summary)
                .await?;
        }
        Ok(())
    }

    async fn seed_artifacts(
        &self,
        parent: &str,
        artifacts: &[SeedArtifact],
        summary: &mut SeedSummary,
    ) -> Result<(), RegistryError> {
        for artifact in artifacts {
            debug!(%parent, id = %artifact.id, "Seeding artifact");
            self.artifact_client
                .create_artifact(
                    parent,
                    &artifact.id,
                    ArtifactCreate {
                        mime_type: artifact.mime_type.clone(),
                        contents: artifact.contents.clone().into_bytes(),
                    },
                )
                .await?;
            summary.artifacts += 1;
        }
        Ok(())
    }
}
