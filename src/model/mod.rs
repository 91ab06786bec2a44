//! Registry resource types and the DTOs used to create and update them.
//!
//! Each kind has a data struct plus `*Create` / `*Update` payloads. The
//! [`ResourceEntity`](registry_framework::ResourceEntity) impls live next to each kind's actor.

pub mod api;
pub mod artifact;
pub mod names;
pub mod project;
pub mod spec;
pub mod version;

pub use api::*;
pub use artifact::*;
pub use names::*;
pub use project::*;
pub use spec::*;
pub use version::*;

use registry_framework::FieldMask;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// User-defined key/value labels. Ordered so listings and serialization are stable.
pub type Labels = BTreeMap<String, String>;

/// Resolve a `labels.<key>` filter path.
pub(crate) fn label_field(labels: &Labels, path: &str) -> Option<String> {
    path.strip_prefix("labels.")
        .and_then(|key| labels.get(key))
        .cloned()
}

/// Write `value` into `target` if the mask selects `field`. Masked but absent values clear it.
pub(crate) fn apply_masked<T: Default>(
    mask: &FieldMask,
    field: &str,
    target: &mut T,
    value: Option<T>,
) {
    if mask.applies(field, value.is_some()) {
        *target = value.unwrap_or_default();
    }
}

/// Hex-encoded SHA-256 of `data`.
pub fn hash_contents(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_contents(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn label_lookup() {
        let labels = Labels::from([("team".to_string(), "edge".to_string())]);
        assert_eq!(label_field(&labels, "labels.team").as_deref(), Some("edge"));
        assert_eq!(label_field(&labels, "labels.owner"), None);
        assert_eq!(label_field(&labels, "team"), None);
    }
}
