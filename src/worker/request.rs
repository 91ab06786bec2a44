//! The request body a worker accepts.

use super::error::WorkerError;
use serde::{Deserialize, Serialize};

/// One command to run against one resource.
///
/// Controllers typically post one of these per generated action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub command: String,
    pub resource: String,
}

impl WorkerRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, WorkerError> {
        Ok(serde_json::from_slice(body)?)
    }
}
