//! # Clients
//!
//! One wrapper per resource kind around the generic
//! [`ResourceClient`](registry_framework::ResourceClient). `get`, `list`, `list_all` and
//! `delete` come from [`TypedClient`](registry_framework::TypedClient); each wrapper adds the
//! registry operations for its kind, taking parents and identifiers instead of raw names.

pub mod api_client;
pub mod artifact_client;
pub mod project_client;
pub mod spec_client;
pub mod version_client;

pub use api_client::ApiClient;
pub use artifact_client::ArtifactClient;
pub use project_client::ProjectClient;
pub use spec_client::SpecClient;
pub use version_client::VersionClient;

use crate::error::RegistryError;
use registry_framework::ListQuery;

/// Build a single-page query from registry list arguments.
pub(crate) fn page_query(
    pattern: &str,
    page_size: i32,
    page_token: Option<String>,
    filter: &str,
) -> Result<ListQuery, RegistryError> {
    Ok(ListQuery::new(pattern)?
        .with_filter(filter)?
        .with_page_size(page_size)?
        .with_page_token(page_token))
}

/// Turn a missing resource into `NotFound`.
pub(crate) fn found<T>(name: &str, item: Option<T>) -> Result<T, RegistryError> {
    item.ok_or_else(|| RegistryError::NotFound(name.to_string()))
}
