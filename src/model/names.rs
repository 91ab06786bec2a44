//! Typed resource names.
//!
//! Names alternate collection keywords and identifiers:
//!
//! ```text
//! projects/{project}
//! projects/{project}/apis/{api}
//! projects/{project}/apis/{api}/versions/{version}
//! projects/{project}/apis/{api}/versions/{version}/specs/{spec}[@{revision}]
//! {project|api|version|spec}/artifacts/{artifact}
//! ```

use crate::error::RegistryError;
use regex::Regex;
use registry_framework::query::WILDCARD;
use std::fmt;
use std::sync::OnceLock;

pub const PROJECTS: &str = "projects";
pub const APIS: &str = "apis";
pub const VERSIONS: &str = "versions";
pub const SPECS: &str = "specs";
pub const ARTIFACTS: &str = "artifacts";

const PROJECT_SHAPE: &[&str] = &[PROJECTS];
const API_SHAPE: &[&str] = &[PROJECTS, APIS];
const VERSION_SHAPE: &[&str] = &[PROJECTS, APIS, VERSIONS];
const SPEC_SHAPE: &[&str] = &[PROJECTS, APIS, VERSIONS, SPECS];

fn id_regex() -> &'static Regex {
    static ID: OnceLock<Regex> = OnceLock::new();
    ID.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9.\-]{0,62}$").expect("id regex is valid"))
}

/// Check a caller-chosen identifier.
pub fn validate_id(id: &str) -> Result<(), RegistryError> {
    if id_regex().is_match(id) {
        Ok(())
    } else {
        Err(RegistryError::InvalidArgument(format!(
            "invalid identifier {id:?}: must be 1-63 lowercase letters, digits, '-' or '.', \
             starting with a letter or digit"
        )))
    }
}

/// Split `name` into its identifiers if its keywords are exactly `shape`.
fn split_ids<'a>(name: &'a str, shape: &[&str]) -> Option<Vec<&'a str>> {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() != shape.len() * 2 {
        return None;
    }
    let mut ids = Vec::with_capacity(shape.len());
    for (pair, keyword) in parts.chunks(2).zip(shape) {
        if pair[0] != *keyword {
            return None;
        }
        ids.push(pair[1]);
    }
    Some(ids)
}

fn parse_ids<'a>(name: &'a str, shape: &[&str], kind: &str) -> Result<Vec<&'a str>, RegistryError> {
    let ids = split_ids(name, shape)
        .ok_or_else(|| RegistryError::InvalidArgument(format!("invalid {kind} name {name:?}")))?;
    ids.iter().try_for_each(|id| validate_id(id))?;
    Ok(ids)
}

/// Build the listing pattern for `collection` under `parent`.
///
/// `parent` may use `-` in place of any identifier; it must have one of `shapes`.
pub fn collection_pattern(
    parent: &str,
    shapes: &[&[&str]],
    collection: &str,
) -> Result<String, RegistryError> {
    let valid = shapes.iter().any(|shape| {
        split_ids(parent, shape).is_some_and(|ids| {
            ids.iter()
                .all(|id| *id == WILDCARD || validate_id(id).is_ok())
        })
    });
    if !valid {
        return Err(RegistryError::InvalidArgument(format!(
            "invalid parent {parent:?} for {collection}"
        )));
    }
    Ok(format!("{parent}/{collection}/{WILDCARD}"))
}

pub fn api_collection(parent: &str) -> Result<String, RegistryError> {
    collection_pattern(parent, &[PROJECT_SHAPE], APIS)
}

pub fn version_collection(parent: &str) -> Result<String, RegistryError> {
    collection_pattern(parent, &[API_SHAPE], VERSIONS)
}

pub fn spec_collection(parent: &str) -> Result<String, RegistryError> {
    collection_pattern(parent, &[VERSION_SHAPE], SPECS)
}

pub fn artifact_collection(parent: &str) -> Result<String, RegistryError> {
    collection_pattern(
        parent,
        &[PROJECT_SHAPE, API_SHAPE, VERSION_SHAPE, SPEC_SHAPE],
        ARTIFACTS,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName {
    pub project: String,
}

impl ProjectName {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let ids = parse_ids(name, PROJECT_SHAPE, "project")?;
        Ok(Self {
            project: ids[0].to_string(),
        })
    }

    pub fn api(&self, api: &str) -> ApiName {
        ApiName {
            project: self.project.clone(),
            api: api.to_string(),
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PROJECTS}/{}", self.project)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiName {
    pub project: String,
    pub api: String,
}

impl ApiName {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let ids = parse_ids(name, API_SHAPE, "api")?;
        Ok(Self {
            project: ids[0].to_string(),
            api: ids[1].to_string(),
        })
    }

    pub fn parent(&self) -> ProjectName {
        ProjectName {
            project: self.project.clone(),
        }
    }

    pub fn version(&self, version: &str) -> VersionName {
        VersionName {
            project: self.project.clone(),
            api: self.api.clone(),
            version: version.to_string(),
        }
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{APIS}/{}", self.parent(), self.api)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionName {
    pub project: String,
    pub api: String,
    pub version: String,
}

impl VersionName {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let ids = parse_ids(name, VERSION_SHAPE, "version")?;
        Ok(Self {
            project: ids[0].to_string(),
            api: ids[1].to_string(),
            version: ids[2].to_string(),
        })
    }

    pub fn parent(&self) -> ApiName {
        ApiName {
            project: self.project.clone(),
            api: self.api.clone(),
        }
    }

    pub fn spec(&self, spec: &str) -> SpecName {
        SpecName {
            project: self.project.clone(),
            api: self.api.clone(),
            version: self.version.clone(),
            spec: spec.to_string(),
            revision: None,
        }
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{VERSIONS}/{}", self.parent(), self.version)
    }
}

/// A spec name, optionally pinned to one revision with `@{revision}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecName {
    pub project: String,
    pub api: String,
    pub version: String,
    pub spec: String,
    pub revision: Option<String>,
}

impl SpecName {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let (base, revision) = match name.split_once('@') {
            Some((base, revision)) => {
                validate_id(revision)?;
                (base, Some(revision.to_string()))
            }
            None => (name, None),
        };
        let ids = parse_ids(base, SPEC_SHAPE, "spec")?;
        Ok(Self {
            project: ids[0].to_string(),
            api: ids[1].to_string(),
            version: ids[2].to_string(),
            spec: ids[3].to_string(),
            revision,
        })
    }

    pub fn parent(&self) -> VersionName {
        VersionName {
            project: self.project.clone(),
            api: self.api.clone(),
            version: self.version.clone(),
        }
    }

    /// The name without its revision suffix.
    pub fn without_revision(&self) -> SpecName {
        SpecName {
            revision: None,
            ..self.clone()
        }
    }

    pub fn with_revision(&self, revision: &str) -> SpecName {
        SpecName {
            revision: Some(revision.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for SpecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{SPECS}/{}", self.parent(), self.spec)?;
        if let Some(revision) = &self.revision {
            write!(f, "@{revision}")?;
        }
        Ok(())
    }
}

/// Any resource that can own artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactParent {
    Project(ProjectName),
    Api(ApiName),
    Version(VersionName),
    Spec(SpecName),
}

impl ArtifactParent {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let depth = name.split('/').count();
        match depth {
            2 => ProjectName::parse(name).map(Self::Project),
            4 => ApiName::parse(name).map(Self::Api),
            6 => VersionName::parse(name).map(Self::Version),
            8 => SpecName::parse(name).map(Self::Spec),
            _ => Err(RegistryError::InvalidArgument(format!(
                "invalid artifact parent {name:?}"
            ))),
        }
    }
}

impl fmt::Display for ArtifactParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(name) => write!(f, "{name}"),
            Self::Api(name) => write!(f, "{name}"),
            Self::Version(name) => write!(f, "{name}"),
            Self::Spec(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName {
    pub parent: ArtifactParent,
    pub artifact: String,
}

impl ArtifactName {
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let invalid = || RegistryError::InvalidArgument(format!("invalid artifact name {name:?}"));
        let (parent, artifact) = name
            .rsplit_once(&format!("/{ARTIFACTS}/"))
            .ok_or_else(invalid)?;
        validate_id(artifact)?;
        let parent = ArtifactParent::parse(parent).map_err(|_| invalid())?;
        if matches!(&parent, ArtifactParent::Spec(spec) if spec.revision.is_some()) {
            return Err(invalid());
        }
        Ok(Self {
            parent,
            artifact: artifact.to_string(),
        })
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{ARTIFACTS}/{}", self.parent, self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(validate_id("petstore").is_ok());
        assert!(validate_id("openapi.yaml").is_ok());
        assert!(validate_id("1.0.0").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("-leading").is_err());
        assert!(validate_id("Upper").is_err());
        assert!(validate_id(&"a".repeat(64)).is_err());
    }

    #[test]
    fn spec_name_round_trips_revision() {
        let name = SpecName::parse("projects/p/apis/a/versions/v1/specs/openapi.yaml@1a2b3c4d").unwrap();
        assert_eq!(name.revision.as_deref(), Some("1a2b3c4d"));
        assert_eq!(
            name.without_revision().to_string(),
            "projects/p/apis/a/versions/v1/specs/openapi.yaml"
        );
        assert_eq!(
            name.to_string(),
            "projects/p/apis/a/versions/v1/specs/openapi.yaml@1a2b3c4d"
        );
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        assert!(ApiName::parse("projects/p").is_err());
        assert!(ApiName::parse("projects/p/versions/v").is_err());
        assert!(VersionName::parse("projects/p/apis/a/versions/V1").is_err());
    }

    #[test]
    fn artifact_parents() {
        let project = ArtifactName::parse("projects/p/artifacts/summary").unwrap();
        assert!(matches!(project.parent, ArtifactParent::Project(_)));

        let spec = ArtifactName::parse("projects/p/apis/a/versions/v/specs/s/artifacts/lint").unwrap();
        assert!(matches!(spec.parent, ArtifactParent::Spec(_)));
        assert_eq!(
            spec.to_string(),
            "projects/p/apis/a/versions/v/specs/s/artifacts/lint"
        );

        assert!(ArtifactName::parse("projects/p/apis/a/artifacts").is_err());
        assert!(ArtifactName::parse("projects/p/apis/a/versions/v/specs/s@r1/artifacts/x").is_err());
    }

    #[test]
    fn collection_patterns_accept_wildcards() {
        assert_eq!(
            version_collection("projects/p/apis/-").unwrap(),
            "projects/p/apis/-/versions/-"
        );
        assert_eq!(
            artifact_collection("projects/-/apis/a").unwrap(),
            "projects/-/apis/a/artifacts/-"
        );
        assert!(spec_collection("projects/p/apis/a").is_err());
        assert!(api_collection("projects/P").is_err());
    }
}
