//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, independent of any resource kind.
//! Entity hook failures travel inside [`FrameworkError::EntityError`] so the kind-specific
//! client can recover its own error type.

/// Errors that can occur within the resource framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Resource already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
