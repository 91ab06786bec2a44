//! Deciding which targets to (re)generate.
//!
//! Two passes over the same dependency maps:
//!
//! 1. **Existing targets.** A target is evaluated only if every dependency has a group for
//!    it. It is stale when any of those groups was updated strictly after the target.
//! 2. **Missing targets.** Every group of the first dependency that no target claimed in
//!    pass 1 gets a creation action, provided every other dependency has that group too.
//!
//! Incomplete information never produces an action.

use super::dependency::DependencyMap;
use super::error::ControllerError;
use super::manifest::Dependency;
use super::patterns::{extract_group, generate_command};
use super::resource::Resource;
use std::collections::BTreeSet;
use tracing::debug;

/// Commands that bring `targets` up to date with their dependencies.
///
/// `dependencies` and `maps` are parallel: `maps[i]` was built from `dependencies[i]`.
///
/// # Panics
/// If the two slices differ in length.
pub fn generate_actions<R: Resource>(
    targets: &[R],
    dependencies: &[Dependency],
    maps: &[DependencyMap<R>],
    action: &str,
) -> Result<Vec<String>, ControllerError> {
    assert_eq!(
        dependencies.len(),
        maps.len(),
        "every dependency needs exactly one map"
    );

    let mut commands = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();

    'targets: for target in targets {
        let mut representatives = Vec::with_capacity(maps.len());
        let mut stale = false;
        let mut first_group = None;

        for (dependency, map) in dependencies.iter().zip(maps) {
            let group = extract_group(&dependency.pattern, target.name())?;
            let Some(collection) = map.get(&group) else {
                debug!(target = target.name(), %group, "Dependency missing, skipping");
                continue 'targets;
            };
            stale |= collection.max_update_time() > target.update_timestamp();
            representatives.push(collection.representative().name());
            first_group.get_or_insert(group);
        }

        if let Some(group) = first_group {
            visited.insert(group);
        }
        if stale {
            commands.push(generate_command(action, &representatives)?);
        }
    }

    let Some((first, others)) = maps.split_first() else {
        return Ok(commands);
    };
    for (group, collection) in first {
        if visited.contains(group) {
            continue;
        }
        let rest: Option<Vec<&str>> = others
            .iter()
            .map(|map| map.get(group).map(|c| c.representative().name()))
            .collect();
        let Some(rest) = rest else {
            debug!(%group, "Dependency missing, not creating");
            continue;
        };
        let mut representatives = vec![collection.representative().name()];
        representatives.extend(rest);
        commands.push(generate_command(action, &representatives)?);
    }

    Ok(commands)
}
