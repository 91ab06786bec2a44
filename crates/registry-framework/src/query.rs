//! # List Queries
//!
//! Everything a `List` request needs: a name pattern with `-` wildcards, an optional filter
//! expression, and page bounds.
//!
//! ```rust
//! use registry_framework::ListQuery;
//!
//! let query = ListQuery::new("projects/demo/apis/-/versions/-")
//!     .unwrap()
//!     .with_filter("state == 'production'")
//!     .unwrap()
//!     .with_page_size(0)
//!     .unwrap();
//! assert_eq!(query.page_size(), 50);
//! assert!(query.pattern().matches("projects/demo/apis/petstore/versions/v1"));
//! ```

use crate::error::FrameworkError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Page size used when the caller asks for 0.
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// Larger requests are clamped to this.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Segment that matches any single name segment.
pub const WILDCARD: &str = "-";

/// A resource-name pattern. Segments equal to `-` match any one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    segments: Vec<String>,
}

impl NamePattern {
    pub fn parse(pattern: &str) -> Result<Self, FrameworkError> {
        if pattern.is_empty() || pattern.split('/').any(str::is_empty) {
            return Err(FrameworkError::InvalidArgument(format!(
                "invalid name pattern {pattern:?}"
            )));
        }
        Ok(Self {
            segments: pattern.split('/').map(str::to_string).collect(),
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        let mut parts = name.split('/');
        for segment in &self.segments {
            match parts.next() {
                Some(part) if segment == WILDCARD || segment == part => {}
                _ => return false,
            }
        }
        parts.next().is_none()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    field: String,
    op: Op,
    value: String,
}

/// A conjunction of `field == 'value'` / `field != 'value'` clauses joined with `&&`.
///
/// A field the entity does not have never equals anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    source: String,
    clauses: Vec<Clause>,
}

/// One clause at the start of the input, followed by `&&` or the end of input.
fn clause_regex() -> &'static Regex {
    static CLAUSE: OnceLock<Regex> = OnceLock::new();
    CLAUSE.get_or_init(|| {
        Regex::new(
            r#"^\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*(==|!=)\s*(?:'([^']*)'|"([^"]*)")\s*(&&|$)"#,
        )
        .expect("clause regex is valid")
    })
}

impl Filter {
    /// Parse a filter. Blank input yields `None` (match everything).
    ///
    /// Clauses are read left to right, so a quoted value may itself contain `&&`.
    pub fn parse(source: &str) -> Result<Option<Self>, FrameworkError> {
        if source.trim().is_empty() {
            return Ok(None);
        }
        let mut clauses = Vec::new();
        let mut rest = source;
        loop {
            let caps = clause_regex().captures(rest).ok_or_else(|| {
                FrameworkError::InvalidArgument(format!(
                    "invalid filter {source:?}: cannot parse {:?}",
                    rest.trim()
                ))
            })?;
            let op = if &caps[2] == "==" { Op::Eq } else { Op::Ne };
            let value = caps
                .get(3)
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            clauses.push(Clause {
                field: caps[1].to_string(),
                op,
                value,
            });
            if caps[5].is_empty() {
                break;
            }
            rest = &rest[caps[0].len()..];
        }
        Ok(Some(Self {
            source: source.to_string(),
            clauses,
        }))
    }

    /// Evaluate against a field lookup.
    pub fn eval<F>(&self, field: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.clauses.iter().all(|clause| {
            let actual = field(&clause.field);
            let equal = actual.as_deref() == Some(clause.value.as_str());
            match clause.op {
                Op::Eq => equal,
                Op::Ne => !equal,
            }
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parameters of a `List` request.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pattern: NamePattern,
    filter: Option<Filter>,
    page_size: usize,
    page_token: Option<String>,
}

impl ListQuery {
    pub fn new(pattern: &str) -> Result<Self, FrameworkError> {
        Ok(Self {
            pattern: NamePattern::parse(pattern)?,
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_token: None,
        })
    }

    pub fn with_filter(mut self, filter: &str) -> Result<Self, FrameworkError> {
        self.filter = Filter::parse(filter)?;
        Ok(self)
    }

    /// Negative sizes are rejected, 0 means the default, oversized requests are clamped.
    pub fn with_page_size(mut self, page_size: i32) -> Result<Self, FrameworkError> {
        self.page_size = match page_size {
            n if n < 0 => {
                return Err(FrameworkError::InvalidArgument(format!(
                    "invalid page_size {n}: must not be negative"
                )))
            }
            0 => DEFAULT_PAGE_SIZE,
            n => (n as usize).min(MAX_PAGE_SIZE),
        };
        Ok(self)
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }
}

/// One page of a listing, ordered by name.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque token for the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_one_segment() {
        let pattern = NamePattern::parse("projects/p/apis/-/versions/-").unwrap();
        assert!(pattern.matches("projects/p/apis/a/versions/v1"));
        assert!(!pattern.matches("projects/p/apis/a"));
        assert!(!pattern.matches("projects/p/apis/a/versions/v1/specs/s"));
        assert!(!pattern.matches("projects/q/apis/a/versions/v1"));
    }

    #[test]
    fn empty_segments_are_invalid() {
        assert!(NamePattern::parse("projects//apis").is_err());
        assert!(NamePattern::parse("").is_err());
    }

    #[test]
    fn filter_conjunction() {
        let filter = Filter::parse("mime_type == 'application/x.openapi' && labels.team != \"core\"")
            .unwrap()
            .unwrap();
        let fields = |f: &str| match f {
            "mime_type" => Some("application/x.openapi".to_string()),
            "labels.team" => Some("edge".to_string()),
            _ => None,
        };
        assert!(filter.eval(fields));

        let missing = Filter::parse("owner == 'x'").unwrap().unwrap();
        assert!(!missing.eval(fields));
    }

    #[test]
    fn blank_filter_matches_everything() {
        assert!(Filter::parse("   ").unwrap().is_none());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        assert!(matches!(
            Filter::parse("mime_type = openapi"),
            Err(FrameworkError::InvalidArgument(_))
        ));
    }

    #[test]
    fn quoted_values_may_contain_the_separator() {
        let filter = Filter::parse("description == 'a && b' && owner != \"x && y\"")
            .unwrap()
            .unwrap();
        let fields = |f: &str| match f {
            "description" => Some("a && b".to_string()),
            "owner" => Some("z".to_string()),
            _ => None,
        };
        assert!(filter.eval(fields));
    }

    #[test]
    fn dangling_or_missing_separators_are_rejected() {
        for source in ["genre == 'x' &&", "genre == 'x' capacity == '1'", "&& genre == 'x'"] {
            assert!(
                matches!(Filter::parse(source), Err(FrameworkError::InvalidArgument(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn page_size_clamping() {
        let q = ListQuery::new("projects/-").unwrap();
        assert_eq!(q.clone().with_page_size(0).unwrap().page_size(), 50);
        assert_eq!(q.clone().with_page_size(5000).unwrap().page_size(), 1000);
        assert_eq!(q.clone().with_page_size(7).unwrap().page_size(), 7);
        assert!(q.with_page_size(-1).is_err());
    }
}
