use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level container for everything else in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Payload for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCreate {
    pub display_name: String,
    pub description: String,
}

/// Payload for updating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, params: ProjectCreate) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            display_name: params.display_name,
            description: params.description,
            create_time: now,
            update_time: now,
        }
    }
}
