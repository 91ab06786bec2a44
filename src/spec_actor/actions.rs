//! Revision-aware reads on a [`Spec`](crate::model::Spec).

use crate::model::{Spec, SpecContents};

/// Spec operations beyond CRUD. All of them address the spec by its revision-free name.
#[derive(Debug, Clone)]
pub enum SpecAction {
    /// The spec as of one revision.
    GetRevision(String),
    /// Every revision, newest first.
    ListRevisions,
    /// Contents of the given revision, or of the current one.
    GetContents(Option<String>),
}

/// Results from [`SpecAction`]s. Variants match 1:1.
#[derive(Debug, Clone)]
pub enum SpecActionResult {
    Revision(Spec),
    Revisions(Vec<Spec>),
    Contents(SpecContents),
}
