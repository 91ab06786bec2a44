use super::Labels;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An API: the unit that owns versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Free-form availability level (e.g. `GENERAL`, `ALPHA`).
    pub availability: String,
    /// Name of the version consumers should use.
    pub recommended_version: String,
    pub labels: Labels,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Payload for creating an API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiCreate {
    pub display_name: String,
    pub description: String,
    pub availability: String,
    pub recommended_version: String,
    pub labels: Labels,
}

/// Payload for updating an API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub availability: Option<String>,
    pub recommended_version: Option<String>,
    pub labels: Option<Labels>,
}

impl Api {
    pub fn new(name: impl Into<String>, params: ApiCreate) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            display_name: params.display_name,
            description: params.description,
            availability: params.availability,
            recommended_version: params.recommended_version,
            labels: params.labels,
            create_time: now,
            update_time: now,
        }
    }
}
