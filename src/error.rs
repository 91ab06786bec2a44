//! Error type shared by every registry resource kind.

use registry_framework::FrameworkError;
use thiserror::Error;

/// Errors returned by registry operations.
///
/// The variants follow the status codes a registry client expects, so callers can branch on
/// "missing" versus "malformed" without parsing messages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The resource exists but is not in a state the operation can work with
    /// (e.g. spec contents that do not decompress).
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    /// The actor backing a kind is gone.
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FrameworkError> for RegistryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                RegistryError::Unavailable(e.to_string())
            }
            FrameworkError::NotFound(name) => RegistryError::NotFound(name),
            FrameworkError::AlreadyExists(name) => RegistryError::AlreadyExists(name),
            FrameworkError::InvalidArgument(msg) => RegistryError::InvalidArgument(msg),
            // Entity hooks raise RegistryError; recover it instead of flattening to a string.
            FrameworkError::EntityError(inner) => match inner.downcast::<RegistryError>() {
                Ok(e) => *e,
                Err(other) => RegistryError::Internal(other.to_string()),
            },
        }
    }
}
