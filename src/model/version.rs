use super::Labels;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One version of an API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Lifecycle stage (e.g. `design`, `production`).
    pub state: String,
    pub labels: Labels,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Payload for creating a version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionCreate {
    pub display_name: String,
    pub description: String,
    pub state: String,
    pub labels: Labels,
}

/// Payload for updating a version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub labels: Option<Labels>,
}

impl Version {
    pub fn new(name: impl Into<String>, params: VersionCreate) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            display_name: params.display_name,
            description: params.description,
            state: params.state,
            labels: params.labels,
            create_time: now,
            update_time: now,
        }
    }
}
