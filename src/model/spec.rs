//! API specs and their revision history.
//!
//! A spec always has a current revision. Writing contents whose hash differs from the
//! current revision's starts a new revision; anything else touches the current one in place.

use super::{hash_contents, Labels};
use crate::error::RegistryError;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// MIME suffix marking gzip-compressed contents.
pub const GZIP_SUFFIX: &str = "+gzip";

/// One immutable-contents snapshot of a spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRevision {
    pub revision_id: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub mime_type: String,
    pub size_bytes: u64,
    /// SHA-256 of `contents`, hex encoded.
    pub hash: String,
    #[serde(skip)]
    pub contents: Vec<u8>,
}

impl SpecRevision {
    fn new(mime_type: String, contents: Vec<u8>, now: DateTime<Utc>) -> Self {
        Self {
            revision_id: new_revision_id(),
            create_time: now,
            update_time: now,
            mime_type,
            size_bytes: contents.len() as u64,
            hash: hash_contents(&contents),
            contents,
        }
    }

    /// Contents as served to readers. `+gzip` types are inflated and lose the suffix.
    pub fn contents(&self) -> Result<SpecContents, RegistryError> {
        if !self.mime_type.contains(GZIP_SUFFIX) {
            return Ok(SpecContents {
                content_type: self.mime_type.clone(),
                data: self.contents.clone(),
            });
        }
        let mut data = Vec::new();
        GzDecoder::new(self.contents.as_slice())
            .read_to_end(&mut data)
            .map_err(|e| {
                RegistryError::FailedPrecondition(format!(
                    "failed to unzip contents with gzip MIME type: {e}"
                ))
            })?;
        Ok(SpecContents {
            content_type: self.mime_type.replacen(GZIP_SUFFIX, "", 1),
            data,
        })
    }
}

/// Eight hex characters of a random UUID.
fn new_revision_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Raw spec contents with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecContents {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A description of one version of an API in a machine-readable format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Name without a revision suffix.
    pub name: String,
    pub filename: String,
    pub description: String,
    pub mime_type: String,
    pub source_uri: String,
    pub labels: Labels,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    /// The current revision.
    pub revision: SpecRevision,
    /// Earlier revisions, oldest first.
    pub history: Vec<SpecRevision>,
}

/// Payload for creating a spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecCreate {
    pub filename: String,
    pub description: String,
    pub mime_type: String,
    pub source_uri: String,
    pub labels: Labels,
    pub contents: Vec<u8>,
}

/// Payload for updating a spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecUpdate {
    pub filename: Option<String>,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    pub source_uri: Option<String>,
    pub labels: Option<Labels>,
    pub contents: Option<Vec<u8>>,
}

impl From<SpecUpdate> for SpecCreate {
    fn from(update: SpecUpdate) -> Self {
        Self {
            filename: update.filename.unwrap_or_default(),
            description: update.description.unwrap_or_default(),
            mime_type: update.mime_type.unwrap_or_default(),
            source_uri: update.source_uri.unwrap_or_default(),
            labels: update.labels.unwrap_or_default(),
            contents: update.contents.unwrap_or_default(),
        }
    }
}

impl Spec {
    pub fn new(name: impl Into<String>, params: SpecCreate) -> Self {
        let now = Utc::now();
        let revision = SpecRevision::new(params.mime_type.clone(), params.contents, now);
        Self {
            name: name.into(),
            filename: params.filename,
            description: params.description,
            mime_type: params.mime_type,
            source_uri: params.source_uri,
            labels: params.labels,
            create_time: now,
            update_time: now,
            revision,
            history: Vec::new(),
        }
    }

    pub fn revision_id(&self) -> &str {
        &self.revision.revision_id
    }

    /// `name@revision` of the current revision.
    pub fn revision_name(&self) -> String {
        format!("{}@{}", self.name, self.revision.revision_id)
    }

    pub fn revision_update_time(&self) -> DateTime<Utc> {
        self.revision.update_time
    }

    /// Store `contents` at `now`, starting a new revision if they differ from the current ones.
    pub fn commit_contents(&mut self, contents: Vec<u8>, now: DateTime<Utc>) {
        if hash_contents(&contents) == self.revision.hash {
            self.revision.update_time = now;
            return;
        }
        let next = SpecRevision::new(self.mime_type.clone(), contents, now);
        let previous = std::mem::replace(&mut self.revision, next);
        self.history.push(previous);
    }

    /// Refresh the current revision after a metadata-only change.
    pub fn touch_revision(&mut self, now: DateTime<Utc>) {
        self.revision.mime_type = self.mime_type.clone();
        self.revision.update_time = now;
    }

    /// The spec as it looked at `revision_id`: that revision is current and later ones are gone.
    pub fn as_of(&self, revision_id: &str) -> Option<Spec> {
        if self.revision.revision_id == revision_id {
            return Some(self.clone());
        }
        let position = self
            .history
            .iter()
            .position(|r| r.revision_id == revision_id)?;
        let mut view = self.clone();
        view.revision = self.history[position].clone();
        view.mime_type = view.revision.mime_type.clone();
        view.history.truncate(position);
        Some(view)
    }

    /// One view per revision, newest first.
    pub fn revisions(&self) -> Vec<Spec> {
        std::iter::once(self.revision.revision_id.as_str())
            .chain(self.history.iter().rev().map(|r| r.revision_id.as_str()))
            .filter_map(|id| self.as_of(id))
            .collect()
    }
}
