//! Build version stamps: the UTC date followed by the short revision.

use std::path::Path;

use chrono::{NaiveDate, Utc};

use crate::git::{self, GitError};

/// Format a version string such as `2026-10-18-1a2b3c4`.
pub fn format_version(date: NaiveDate, revision: &str) -> String {
    format!("{}-{}", date.format("%Y-%m-%d"), revision)
}

/// The version of the repository enclosing `path`, stamped with today's UTC date.
pub fn current_version(path: &Path) -> Result<String, GitError> {
    let revision = git::short_revision(path)?;
    Ok(format_version(Utc::now().date_naive(), &revision))
}
