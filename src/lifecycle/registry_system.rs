use crate::artifact_actor::{self, ArtifactParents};
use crate::clients::{ApiClient, ArtifactClient, ProjectClient, SpecClient, VersionClient};
use crate::error::RegistryError;
use crate::{api_actor, project_actor, spec_actor, version_actor};
use registry_framework::{Notification, Notifier};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Events a subscriber may fall behind by before it starts losing them.
pub const NOTIFICATION_CAPACITY: usize = 1024;

/// The runtime orchestrator for the in-memory registry.
///
/// `RegistrySystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping one actor per resource kind
/// - **Dependency Wiring**: handing each kind the clients of its possible parents
/// - **Change Notifications**: one channel shared by every actor, see [`RegistrySystem::subscribe`]
///
/// # Architecture
///
/// ```text
/// Project  <- Api <- Version <- Spec
///    ^        ^        ^         ^
///    +--------+--------+---------+-- Artifact
/// ```
///
/// Arrows point from a kind to the kinds whose clients it holds as context. The graph is
/// acyclic, so dropping the system's clients shuts every actor down.
///
/// # Example
///
/// ```rust
/// use apg_registry::lifecycle::RegistrySystem;
/// use apg_registry::model::{ApiCreate, ProjectCreate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = RegistrySystem::new();
///     system.project_client.create_project("demo", ProjectCreate::default()).await?;
///     system
///         .api_client
///         .create_api("projects/demo", "petstore", ApiCreate::default())
///         .await?;
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct RegistrySystem {
    pub project_client: ProjectClient,
    pub api_client: ApiClient,
    pub version_client: VersionClient,
    pub spec_client: SpecClient,
    pub artifact_client: ArtifactClient,

    notifier: Notifier,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl Default for RegistrySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrySystem {
    /// Spawns every actor with its parents' clients injected.
    pub fn new() -> Self {
        let notifier = Notifier::new(NOTIFICATION_CAPACITY);
        let (project_actor, project_client) = project_actor::new();
        let (api_actor, api_client) = api_actor::new();
        let (version_actor, version_client) = version_actor::new();
        let (spec_actor, spec_client) = spec_actor::new();
        let (artifact_actor, artifact_client) = artifact_actor::new();

        let handles = vec![
            tokio::spawn(project_actor.with_notifier(notifier.clone()).run(())),
            tokio::spawn(
                api_actor
                    .with_notifier(notifier.clone())
                    .run(project_client.clone()),
            ),
            tokio::spawn(
                version_actor
                    .with_notifier(notifier.clone())
                    .run(api_client.clone()),
            ),
            tokio::spawn(
                spec_actor
                    .with_notifier(notifier.clone())
                    .run(version_client.clone()),
            ),
            tokio::spawn(artifact_actor.with_notifier(notifier.clone()).run(ArtifactParents {
                projects: project_client.clone(),
                apis: api_client.clone(),
                versions: version_client.clone(),
                specs: spec_client.clone(),
            })),
        ];
        info!(actors = handles.len(), "Registry started");

        Self {
            project_client,
            api_client,
            version_client,
            spec_client,
            artifact_client,
            notifier,
            handles,
        }
    }

    /// Receive every create, update and delete from now on.
    ///
    /// Created and updated specs are reported by revision name (`name@revision`); deletions
    /// by plain resource name.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Drops all clients and waits for every actor to drain and exit.
    ///
    /// Clients cloned out of the system keep their actors alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), RegistryError> {
        info!("Shutting down registry...");

        drop(self.artifact_client);
        drop(self.spec_client);
        drop(self.version_client);
        drop(self.api_client);
        drop(self.project_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(RegistryError::Internal(format!("actor task failed: {e}")));
            }
        }

        info!("Registry shutdown complete.");
        Ok(())
    }
}
