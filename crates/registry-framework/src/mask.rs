//! Field masks for partial updates.

use crate::error::FrameworkError;

/// The set of field paths an update applies to.
///
/// An empty mask means "every field present in the update payload". A non-empty mask
/// applies exactly the listed fields, clearing the ones the payload leaves out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty mask.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Whether a field was explicitly named by the mask.
    pub fn names(&self, field: &str) -> bool {
        self.paths.iter().any(|p| p == field)
    }

    /// Decide whether `field` should be written, given whether the payload carries a value.
    ///
    /// - empty mask: write only fields the payload sets
    /// - explicit mask: write every named field, set or not
    pub fn applies(&self, field: &str, present: bool) -> bool {
        if self.is_empty() {
            present
        } else {
            self.names(field)
        }
    }

    /// Reject paths outside `allowed`.
    pub fn validate(&self, allowed: &[&str]) -> Result<(), FrameworkError> {
        match self.paths.iter().find(|p| !allowed.contains(&p.as_str())) {
            Some(unknown) => Err(FrameworkError::InvalidArgument(format!(
                "invalid update_mask: unknown field {unknown:?}"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mask_applies_present_fields_only() {
        let mask = FieldMask::all();
        assert!(mask.applies("description", true));
        assert!(!mask.applies("description", false));
    }

    #[test]
    fn explicit_mask_clears_absent_fields() {
        let mask = FieldMask::new(["description"]);
        assert!(mask.applies("description", false));
        assert!(!mask.applies("display_name", true));
    }

    #[test]
    fn unknown_path_is_rejected() {
        let mask = FieldMask::new(["display_name", "owner"]);
        let err = mask.validate(&["display_name"]).unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidArgument(msg) if msg.contains("owner")));
    }
}
