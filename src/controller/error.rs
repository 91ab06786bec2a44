use crate::error::RegistryError;
use thiserror::Error;

/// Errors raised while evaluating a manifest.
///
/// All of them are confined to the manifest entry (or dependency) being processed.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("pattern {pattern:?} references the {entity} of {base:?}, which it does not have")]
    UnresolvedReference {
        pattern: String,
        entity: String,
        base: String,
    },

    #[error("resource {name:?} has no {entity} to group by under pattern {pattern:?}")]
    GroupMismatch {
        pattern: String,
        name: String,
        entity: String,
    },

    #[error("invalid action template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("cannot list {0:?}: unsupported collection")]
    UnsupportedCollection(String),

    #[error("listing {pattern:?} timed out")]
    Timeout { pattern: String },

    #[error("cancelled")]
    Cancelled,

    #[error("dependency {pattern:?} failed: {source}")]
    Dependency {
        pattern: String,
        #[source]
        source: Box<ControllerError>,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("cannot read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}
