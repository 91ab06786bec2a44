//! Pattern resolution, grouping and action templates.
//!
//! Manifest patterns are resource-name patterns with `-` wildcards. A dependency pattern may
//! start with a reference to the target pattern:
//!
//! ```text
//! target:      projects/demo/apis/-/versions/-/specs/-/artifacts/lint
//! dependency:  $resource.spec
//! extended:    projects/demo/apis/-/versions/-/specs/-
//! ```
//!
//! Resources found through a referencing pattern are grouped by the concrete prefix of their
//! name ending at the referenced entity, which is the same prefix the matching target has. Patterns
//! without a reference put everything in one group, [`DEFAULT_GROUP`].

use super::error::ControllerError;
use crate::model::{APIS, ARTIFACTS, PROJECTS, SPECS, VERSIONS};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Prefix of a dependency pattern that refers back to the target pattern.
pub const RESOURCE_REFERENCE: &str = "$resource.";

/// Group key of resources matched by a pattern without a reference.
pub const DEFAULT_GROUP: &str = "default";

/// A level of the resource hierarchy that patterns and templates can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Project,
    Api,
    Version,
    Spec,
    Artifact,
}

impl Entity {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "project" => Some(Self::Project),
            "api" => Some(Self::Api),
            "version" => Some(Self::Version),
            "spec" => Some(Self::Spec),
            "artifact" => Some(Self::Artifact),
            _ => None,
        }
    }

    fn collection(self) -> &'static str {
        match self {
            Self::Project => PROJECTS,
            Self::Api => APIS,
            Self::Version => VERSIONS,
            Self::Spec => SPECS,
            Self::Artifact => ARTIFACTS,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Project => "project",
            Self::Api => "api",
            Self::Version => "version",
            Self::Spec => "spec",
            Self::Artifact => "artifact",
        };
        write!(f, "{word}")
    }
}

/// The part of a name or pattern up to and including the identifier of `entity`.
///
/// `entity_prefix("projects/p/apis/a/versions/v", Entity::Api) == Some("projects/p/apis/a")`
pub fn entity_prefix(name: &str, entity: Entity) -> Option<String> {
    let segments: Vec<&str> = name.split('/').collect();
    segments
        .chunks(2)
        .position(|pair| pair.len() == 2 && pair[0] == entity.collection())
        .map(|index| segments[..index * 2 + 2].join("/"))
}

/// Split `$resource.<entity>[/rest]` into the entity and the rest.
fn parse_reference(pattern: &str) -> Result<Option<(Entity, &str)>, ControllerError> {
    let Some(reference) = pattern.strip_prefix(RESOURCE_REFERENCE) else {
        if pattern.starts_with('$') {
            return Err(ControllerError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("references must start with {RESOURCE_REFERENCE:?}"),
            });
        }
        return Ok(None);
    };
    let (word, rest) = reference.split_once('/').unwrap_or((reference, ""));
    let entity = Entity::parse(word).ok_or_else(|| ControllerError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: format!("unknown entity {word:?}"),
    })?;
    Ok(Some((entity, rest)))
}

/// Resolve `relative` against the target pattern `base` into a pattern listable on its own.
///
/// Patterns without a reference are taken relative to the project of `base`, unless they are
/// already absolute (`projects/...`).
pub fn extend_pattern(base: &str, relative: &str) -> Result<String, ControllerError> {
    let unresolved = |entity: Entity| ControllerError::UnresolvedReference {
        pattern: relative.to_string(),
        entity: entity.to_string(),
        base: base.to_string(),
    };
    match parse_reference(relative)? {
        Some((entity, rest)) => {
            let prefix = entity_prefix(base, entity).ok_or_else(|| unresolved(entity))?;
            if rest.is_empty() {
                Ok(prefix)
            } else {
                Ok(format!("{prefix}/{rest}"))
            }
        }
        None if relative.starts_with(&format!("{PROJECTS}/")) => Ok(relative.to_string()),
        None => {
            let project =
                entity_prefix(base, Entity::Project).ok_or_else(|| unresolved(Entity::Project))?;
            Ok(format!("{project}/{relative}"))
        }
    }
}

/// Group key of `name`, which was listed through the (unextended) `pattern`.
pub fn extract_group(pattern: &str, name: &str) -> Result<String, ControllerError> {
    match parse_reference(pattern)? {
        Some((entity, _)) => {
            entity_prefix(name, entity).ok_or_else(|| ControllerError::GroupMismatch {
                pattern: pattern.to_string(),
                name: name.to_string(),
                entity: entity.to_string(),
            })
        }
        None => Ok(DEFAULT_GROUP.to_string()),
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$(\d+)(?:\.([a-z]+))?").expect("placeholder regex is valid")
    })
}

/// Substitute resource names into an action template.
///
/// `$N` becomes the N-th (0-based) name and `$N.<entity>` that name's prefix ending at
/// `<entity>`.
pub fn generate_command(template: &str, names: &[&str]) -> Result<String, ControllerError> {
    let invalid = |reason: String| ControllerError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };
    let mut command = String::with_capacity(template.len());
    let mut last = 0;
    for caps in placeholder_regex().captures_iter(template) {
        let whole = caps.get(0).ok_or_else(|| invalid("empty match".into()))?;
        let index: usize = caps[1]
            .parse()
            .map_err(|_| invalid(format!("bad index in {:?}", whole.as_str())))?;
        let name = names.get(index).ok_or_else(|| {
            invalid(format!(
                "{:?} refers to resource {index}, but only {} are available",
                whole.as_str(),
                names.len()
            ))
        })?;
        let value = match caps.get(2) {
            None => name.to_string(),
            Some(word) => {
                let entity = Entity::parse(word.as_str())
                    .ok_or_else(|| invalid(format!("unknown entity {:?}", word.as_str())))?;
                entity_prefix(name, entity)
                    .ok_or_else(|| invalid(format!("{name:?} has no {entity}")))?
            }
        };
        command.push_str(&template[last..whole.start()]);
        command.push_str(&value);
        last = whole.end();
    }
    command.push_str(&template[last..]);
    Ok(command)
}
