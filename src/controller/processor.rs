//! Manifest processing: the controller's entry point.

use super::actions::generate_actions;
use super::dependency::{group_resources, DependencyMap};
use super::error::ControllerError;
use super::manifest::{Dependency, GeneratedResource, Manifest};
use super::patterns::extend_pattern;
use super::store::ResourceStore;
use crate::model::PROJECTS;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Knobs for a controller run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Fail the whole entry when one of its dependencies cannot be resolved, instead of
    /// evaluating it without that dependency.
    pub strict_dependencies: bool,
    /// Upper bound for each listing call.
    pub list_timeout: Option<Duration>,
}

/// Evaluates manifests against a [`ResourceStore`] scoped to one project.
///
/// Stateless between runs: every call lists what it needs afresh, so running it twice on
/// unchanged data yields the same commands.
pub struct Controller<S: ResourceStore> {
    store: S,
    project_id: String,
    options: ControllerOptions,
}

impl<S: ResourceStore> Controller<S> {
    pub fn new(store: S, project_id: impl Into<String>) -> Self {
        Self {
            store,
            project_id: project_id.into(),
            options: ControllerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    /// Commands for every entry of `manifest`, in manifest order.
    ///
    /// A failing entry is logged and contributes nothing; it never stops the others.
    #[instrument(skip_all, fields(manifest = %manifest.id, project = %self.project_id))]
    pub async fn process_manifest(
        &self,
        manifest: &Manifest,
        cancel: &CancellationToken,
    ) -> Vec<String> {
        let mut commands = Vec::new();
        for resource in &manifest.generated_resources {
            match self.process_manifest_resource(resource, cancel).await {
                Ok(generated) => {
                    info!(pattern = %resource.pattern, actions = generated.len(), "Entry processed");
                    commands.extend(generated);
                }
                Err(e) => {
                    warn!(pattern = %resource.pattern, error = %e, "Skipping entry");
                }
            }
        }
        commands
    }

    /// Commands for one manifest entry.
    pub async fn process_manifest_resource(
        &self,
        resource: &GeneratedResource,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, ControllerError> {
        let pattern = format!("{PROJECTS}/{}/{}", self.project_id, resource.pattern);

        let mut dependencies: Vec<Dependency> = Vec::with_capacity(resource.dependencies.len());
        let mut maps = Vec::with_capacity(resource.dependencies.len());
        for dependency in &resource.dependencies {
            match self
                .generate_dependency_map(&pattern, dependency, cancel)
                .await
            {
                Ok(map) => {
                    dependencies.push(dependency.clone());
                    maps.push(map);
                }
                Err(e) if self.options.strict_dependencies => {
                    return Err(ControllerError::Dependency {
                        pattern: dependency.pattern.clone(),
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    warn!(
                        %pattern,
                        dependency = %dependency.pattern,
                        error = %e,
                        "Dropping dependency"
                    );
                }
            }
        }

        let targets = self.list(&pattern, &resource.filter, cancel).await?;
        debug!(%pattern, targets = targets.len(), "Targets listed");

        let commands = generate_actions(&targets, &dependencies, &maps, &resource.action)?;
        for command in &commands {
            debug!(%command, "Action");
        }
        Ok(commands)
    }

    /// Group the resources of one dependency of the target `resource_pattern`.
    async fn generate_dependency_map(
        &self,
        resource_pattern: &str,
        dependency: &Dependency,
        cancel: &CancellationToken,
    ) -> Result<DependencyMap<S::Resource>, ControllerError> {
        let extended = extend_pattern(resource_pattern, &dependency.pattern)?;
        let resources = self.list(&extended, &dependency.filter, cancel).await?;
        group_resources(&dependency.pattern, resources)
    }

    /// One listing call, bounded by the caller's token and the configured timeout.
    async fn list(
        &self,
        pattern: &str,
        filter: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<S::Resource>, ControllerError> {
        let listing = async {
            match self.options.list_timeout {
                Some(limit) => {
                    tokio::time::timeout(limit, self.store.list_resources(pattern, filter))
                        .await
                        .unwrap_or_else(|_| {
                            Err(ControllerError::Timeout {
                                pattern: pattern.to_string(),
                            })
                        })
                }
                None => self.store.list_resources(pattern, filter).await,
            }
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ControllerError::Cancelled),
            result = listing => result,
        }
    }
}
