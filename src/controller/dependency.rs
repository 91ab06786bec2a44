//! Grouping listed resources into per-group aggregates.

use super::error::ControllerError;
use super::patterns::extract_group;
use super::resource::Resource;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// All resources sharing one group key under one dependency pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCollection<R> {
    max_update_time: DateTime<Utc>,
    members: Vec<R>,
}

impl<R: Resource> ResourceCollection<R> {
    fn new(first: R) -> Self {
        Self {
            max_update_time: first.update_timestamp(),
            members: vec![first],
        }
    }

    /// Append a member, raising the aggregate time only on a strictly later timestamp.
    fn push(&mut self, resource: R) {
        let updated = resource.update_timestamp();
        if updated > self.max_update_time {
            self.max_update_time = updated;
        }
        self.members.push(resource);
    }

    /// Latest update time over all members.
    pub fn max_update_time(&self) -> DateTime<Utc> {
        self.max_update_time
    }

    /// Members in listing order.
    pub fn members(&self) -> &[R] {
        &self.members
    }

    /// The member that stands in for the whole group in action templates: the first one
    /// listed.
    pub fn representative(&self) -> &R {
        &self.members[0]
    }
}

/// Group key to aggregate, for one dependency.
///
/// Ordered by key, so the reconciliation pass emits creation actions in a stable order.
pub type DependencyMap<R> = BTreeMap<String, ResourceCollection<R>>;

/// Fold a listing into a [`DependencyMap`], keying each resource with `dependency_pattern`.
///
/// Any grouping failure fails the whole map; no partial map is returned.
pub fn group_resources<R: Resource>(
    dependency_pattern: &str,
    resources: Vec<R>,
) -> Result<DependencyMap<R>, ControllerError> {
    resources
        .into_iter()
        .try_fold(DependencyMap::new(), |mut map, resource| {
            let key = extract_group(dependency_pattern, resource.name())?;
            match map.get_mut(&key) {
                Some(collection) => collection.push(resource),
                None => {
                    map.insert(key, ResourceCollection::new(resource));
                }
            }
            Ok(map)
        })
}
