//! Manifest files: the generation rules the controller evaluates.

use super::error::ControllerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An ordered list of generation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub generated_resources: Vec<GeneratedResource>,
}

/// One family of target resources and the command that (re)generates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResource {
    /// Target pattern relative to the project, e.g. `apis/-/versions/-/specs/-/artifacts/lint`.
    pub pattern: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Command template; `$0`, `$1`, ... name one representative per dependency.
    pub action: String,
}

/// Upstream resources a target is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Pattern, usually starting with `$resource.<entity>`.
    pub pattern: String,
    #[serde(default)]
    pub filter: String,
}

impl Manifest {
    pub fn from_yaml(source: &str) -> Result<Self, ControllerError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControllerError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }
}
