//! Validated site identifiers.
//!
//! # Responsibilities
//! - Gate every externally supplied name before it becomes a path component
//! - Reject path traversal, separators and hidden-file names outright
//!
//! # Design Decisions
//! - Allow-list, not deny-list: alphanumerics plus '.', '_' and '-'
//! - A leading dot is rejected (hidden files, "." and "..")
//! - Validation happens exactly once; the rest of the crate takes `&SiteName`

use std::fmt;

use crate::sites::types::{SiteError, SiteResult};

/// A site name that is safe to use verbatim as a filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteName(String);

impl SiteName {
    /// Validate and wrap a raw name.
    pub fn parse(raw: &str) -> SiteResult<Self> {
        if raw.is_empty() || raw.starts_with('.') {
            return Err(SiteError::InvalidName(raw.to_string()));
        }
        let allowed = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !allowed {
            return Err(SiteError::InvalidName(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SiteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
