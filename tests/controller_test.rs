use apg_registry::controller::{
    Controller, ControllerError, ControllerOptions, Manifest, RegistryStore, Resource,
    ResourceStore,
};
use apg_registry::error::RegistryError;
use apg_registry::lifecycle::{RegistrySystem, Seed};
use apg_registry::model::{ArtifactCreate, SpecUpdate};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use registry_framework::{FieldMask, NamePattern};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const SPECS: &str = "projects/p/apis/-/versions/-/specs/-";
const COMPLEXITY: &str = "projects/p/apis/-/versions/-/specs/-/artifacts/complexity";
const SPEC_A: &str = "projects/p/apis/a/versions/v1/specs/openapi";
const SPEC_B: &str = "projects/p/apis/b/versions/v1/specs/openapi";
const SPEC_C: &str = "projects/p/apis/c/versions/v1/specs/openapi";

#[derive(Debug, Clone)]
struct Item {
    name: String,
    updated: DateTime<Utc>,
}

impl Resource for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn update_timestamp(&self) -> DateTime<Utc> {
        self.updated
    }
}

fn item(name: &str, seconds: i64) -> Item {
    Item {
        name: name.to_string(),
        updated: Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap(),
    }
}

/// Fixed listing answers; some patterns fail or hang.
#[derive(Default)]
struct StaticStore {
    items: Vec<Item>,
    unavailable: Vec<&'static str>,
    hanging: Vec<&'static str>,
}

#[async_trait]
impl ResourceStore for StaticStore {
    type Resource = Item;

    async fn list_resources(
        &self,
        pattern: &str,
        _filter: &str,
    ) -> Result<Vec<Item>, ControllerError> {
        if self.hanging.iter().any(|p| *p == pattern) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        if self.unavailable.iter().any(|p| *p == pattern) {
            return Err(RegistryError::Unavailable(pattern.to_string()).into());
        }
        let matcher = NamePattern::parse(pattern).map_err(RegistryError::from)?;
        Ok(self
            .items
            .iter()
            .filter(|i| matcher.matches(&i.name))
            .cloned()
            .collect())
    }
}

fn lint(spec: &str, seconds: i64) -> Item {
    item(&format!("{spec}/artifacts/lint"), seconds)
}

fn manifest(yaml: &str) -> Manifest {
    Manifest::from_yaml(yaml).expect("Invalid manifest")
}

const LINT_MANIFEST: &str = r#"
id: lint
generated_resources:
  - pattern: apis/-/versions/-/specs/-/artifacts/lint
    dependencies:
      - pattern: $resource.spec
    action: lint $0
"#;

#[tokio::test]
async fn test_stale_missing_and_fresh_targets() {
    let store = StaticStore {
        items: vec![
            item(SPEC_A, 20),
            item(SPEC_B, 20),
            item(SPEC_C, 5),
            lint(SPEC_A, 10),
            lint(SPEC_C, 30),
        ],
        ..Default::default()
    };
    let controller = Controller::new(store, "p");

    let commands = controller
        .process_manifest(&manifest(LINT_MANIFEST), &CancellationToken::new())
        .await;
    assert_eq!(commands, [format!("lint {SPEC_A}"), format!("lint {SPEC_B}")]);
}

#[tokio::test]
async fn test_failing_entry_does_not_stop_others() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        ..Default::default()
    };
    let controller = Controller::new(store, "p");
    let manifest = manifest(
        r#"
id: mixed
generated_resources:
  - pattern: apis/-/versions/-/specs/-/artifacts/broken
    dependencies:
      - pattern: $resource.spec
    action: broken $3
  - pattern: apis/-/versions/-/specs/-/artifacts/lint
    dependencies:
      - pattern: $resource.spec
    action: lint $0
"#,
    );

    let broken = controller
        .process_manifest_resource(&manifest.generated_resources[0], &CancellationToken::new())
        .await;
    assert!(matches!(broken, Err(ControllerError::InvalidTemplate { .. })));

    let commands = controller
        .process_manifest(&manifest, &CancellationToken::new())
        .await;
    assert_eq!(commands, [format!("lint {SPEC_A}")]);
}

const SCORE_MANIFEST: &str = r#"
id: score
generated_resources:
  - pattern: apis/-/versions/-/specs/-/artifacts/score
    dependencies:
      - pattern: $resource.spec
      - pattern: $resource.spec/artifacts/complexity
    action: score $0
"#;

#[tokio::test]
async fn test_unlistable_dependency_is_dropped() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        unavailable: vec![COMPLEXITY],
        ..Default::default()
    };
    let controller = Controller::new(store, "p");

    let commands = controller
        .process_manifest(&manifest(SCORE_MANIFEST), &CancellationToken::new())
        .await;
    assert_eq!(commands, [format!("score {SPEC_A}")]);
}

#[tokio::test]
async fn test_unlistable_dependency_fails_strict_entry() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        unavailable: vec![COMPLEXITY],
        ..Default::default()
    };
    let controller = Controller::new(store, "p").with_options(ControllerOptions {
        strict_dependencies: true,
        ..Default::default()
    });
    let manifest = manifest(SCORE_MANIFEST);

    let result = controller
        .process_manifest_resource(&manifest.generated_resources[0], &CancellationToken::new())
        .await;
    match result {
        Err(ControllerError::Dependency { pattern, source }) => {
            assert_eq!(pattern, "$resource.spec/artifacts/complexity");
            assert!(matches!(
                *source,
                ControllerError::Registry(RegistryError::Unavailable(_))
            ));
        }
        other => panic!("expected a dependency failure, got {other:?}"),
    }

    let commands = controller
        .process_manifest(&manifest, &CancellationToken::new())
        .await;
    assert!(commands.is_empty());
}

#[tokio::test]
async fn test_unlistable_targets_fail_the_entry() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        unavailable: vec!["projects/p/apis/-/versions/-/specs/-/artifacts/lint"],
        ..Default::default()
    };
    let controller = Controller::new(store, "p");
    let manifest = manifest(LINT_MANIFEST);

    let result = controller
        .process_manifest_resource(&manifest.generated_resources[0], &CancellationToken::new())
        .await;
    assert!(matches!(
        result,
        Err(ControllerError::Registry(RegistryError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn test_cancelled_run_produces_nothing() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        hanging: vec![SPECS],
        ..Default::default()
    };
    let controller = Controller::new(store, "p");
    let manifest = manifest(LINT_MANIFEST);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = controller
        .process_manifest_resource(&manifest.generated_resources[0], &cancel)
        .await;
    assert!(matches!(result, Err(ControllerError::Cancelled)));

    let commands = controller.process_manifest(&manifest, &cancel).await;
    assert!(commands.is_empty());
}

#[tokio::test]
async fn test_slow_listing_times_out() {
    let store = StaticStore {
        items: vec![item(SPEC_A, 20)],
        hanging: vec!["projects/p/apis/-/versions/-/specs/-/artifacts/lint"],
        ..Default::default()
    };
    let controller = Controller::new(store, "p").with_options(ControllerOptions {
        list_timeout: Some(Duration::from_millis(20)),
        ..Default::default()
    });
    let manifest = manifest(LINT_MANIFEST);

    let result = controller
        .process_manifest_resource(&manifest.generated_resources[0], &CancellationToken::new())
        .await;
    match result {
        Err(ControllerError::Timeout { pattern }) => {
            assert_eq!(pattern, "projects/p/apis/-/versions/-/specs/-/artifacts/lint");
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

/// Full system: controller over real actors, reacting to registry writes.
#[tokio::test]
async fn test_registry_round_trip() {
    const SPEC: &str = "projects/demo/apis/petstore/versions/v1/specs/openapi";
    let system = RegistrySystem::new();
    let seed = Seed::from_yaml(
        r#"
projects:
  - id: demo
    apis:
      - id: petstore
        versions:
          - id: v1
            specs:
              - id: openapi
                mime_type: application/x.openapi
                contents: "openapi: 3.0.0"
              - id: proto
                mime_type: application/x.protobuf
                contents: "syntax = 'proto3';"
"#,
    )
    .expect("Invalid seed");
    system.load_seed(&seed).await.expect("Failed to load seed");

    let manifest = manifest(
        r#"
id: lint
generated_resources:
  - pattern: apis/-/versions/-/specs/-/artifacts/lint
    dependencies:
      - pattern: $resource.spec
        filter: "mime_type == 'application/x.openapi'"
    action: registry compute lint $0
"#,
    );
    let controller = Controller::new(RegistryStore::from_system(&system), "demo");
    let cancel = CancellationToken::new();
    let expected = [format!("registry compute lint {SPEC}")];

    // Missing target.
    assert_eq!(controller.process_manifest(&manifest, &cancel).await, expected);

    tokio::time::sleep(Duration::from_millis(5)).await;
    system
        .artifact_client
        .create_artifact(SPEC, "lint", ArtifactCreate::default())
        .await
        .expect("Failed to create lint");

    // Up to date, and unchanged on a second run.
    assert!(controller.process_manifest(&manifest, &cancel).await.is_empty());
    assert!(controller.process_manifest(&manifest, &cancel).await.is_empty());

    tokio::time::sleep(Duration::from_millis(5)).await;
    system
        .spec_client
        .update_spec(
            SPEC,
            SpecUpdate {
                contents: Some(b"openapi: 3.1.0".to_vec()),
                ..Default::default()
            },
            FieldMask::default(),
            false,
        )
        .await
        .expect("Failed to update spec");

    // Stale after the new revision.
    assert_eq!(controller.process_manifest(&manifest, &cancel).await, expected);

    drop(controller);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_unknown_collection_is_rejected() {
    let system = RegistrySystem::new();
    let controller = Controller::new(RegistryStore::from_system(&system), "demo");
    let manifest = manifest(
        r#"
generated_resources:
  - pattern: apis/-/widgets/-
    action: build $0
"#,
    );

    let result = controller
        .process_manifest_resource(&manifest.generated_resources[0], &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(ControllerError::UnsupportedCollection(_))));

    drop(controller);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_demo_manifest() {
    let root = env!("CARGO_MANIFEST_DIR");
    let seed = Seed::load(format!("{root}/demos/registry.yaml")).expect("Invalid demo seed");
    let manifest =
        Manifest::load(format!("{root}/demos/manifest.yaml")).expect("Invalid demo manifest");

    let system = RegistrySystem::new();
    system.load_seed(&seed).await.expect("Failed to load seed");
    let controller = Controller::new(RegistryStore::from_system(&system), "demo");

    let commands = controller
        .process_manifest(&manifest, &CancellationToken::new())
        .await;
    assert_eq!(
        commands,
        [
            "registry compute lint projects/demo/apis/petstore/versions/v1/specs/openapi",
            "registry compute lint projects/demo/apis/petstore/versions/v2/specs/openapi",
            "registry compute score projects/demo/apis/petstore/versions/v1/specs/openapi projects/demo/apis/petstore/versions/v1/specs/openapi/artifacts/complexity",
            "registry compute vocabulary projects/demo/apis/bookstore/versions/v1",
            "registry compute vocabulary projects/demo/apis/petstore/versions/v1",
            "registry compute vocabulary projects/demo/apis/petstore/versions/v2",
            "registry compute index projects/demo",
        ]
    );

    drop(controller);
    system.shutdown().await.expect("Shutdown failed");
}
