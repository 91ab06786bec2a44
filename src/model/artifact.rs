use super::hash_contents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Arbitrary content attached to a project, API, version or spec.
///
/// The controller writes its generated results (lint reports, complexity scores) as artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub hash: String,
    #[serde(skip)]
    pub contents: Vec<u8>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Payload for creating an artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactCreate {
    pub mime_type: String,
    pub contents: Vec<u8>,
}

/// Payload for replacing parts of an artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactUpdate {
    pub mime_type: Option<String>,
    pub contents: Option<Vec<u8>>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, params: ArtifactCreate) -> Self {
        let now = Utc::now();
        let mut artifact = Self {
            name: name.into(),
            mime_type: params.mime_type,
            size_bytes: 0,
            hash: String::new(),
            contents: Vec::new(),
            create_time: now,
            update_time: now,
        };
        artifact.set_contents(params.contents);
        artifact
    }

    pub fn set_contents(&mut self, contents: Vec<u8>) {
        self.size_bytes = contents.len() as u64;
        self.hash = hash_contents(&contents);
        self.contents = contents;
    }
}
