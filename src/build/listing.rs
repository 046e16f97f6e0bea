//! Non-recursive directory listing filtered by file extension.

use std::path::{Path, PathBuf};

use tracing::debug;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ListError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Options
// =============================================================================

/// Options controlling which files a listing returns.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// File names to leave out, compared case-insensitively.
    pub ignore: Vec<String>,
    /// Sort the result by name instead of keeping enumeration order.
    pub sort: bool,
}

impl ListOptions {
    /// Add a name to the ignore set.
    pub fn ignoring(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(name.into());
        self
    }

    fn is_ignored(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.ignore.iter().any(|i| i.to_lowercase() == name)
    }
}

// =============================================================================
// Listing
// =============================================================================

/// The extension of a file name: everything after the last `.`.
///
/// The text after the last dot, or the whole name when it has no dot,
/// so a file named `md` matches the `md` extension.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, ext)| ext)
}

/// List the regular files directly inside `dir` whose extension matches
/// `extension` (case-insensitive) and whose name is not ignored.
///
/// Unless `options.sort` is set, names come back in whatever order the
/// operating system enumerates them.
pub async fn list_files(
    dir: &Path,
    extension: &str,
    options: &ListOptions,
) -> Result<Vec<String>, ListError> {
    let extension = extension.to_lowercase();

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ListError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| ListError::ReadEntry {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("skipping non UTF-8 file name {:?}", raw);
                continue;
            }
        };

        let matches = extension_of(&name).to_lowercase() == extension;
        if !matches || options.is_ignored(&name) {
            continue;
        }

        // Follow symlinks so a link to a chapter still counts as a file
        let metadata = tokio::fs::metadata(entry.path())
            .await
            .map_err(|e| ListError::ReadEntry {
                path: dir.to_path_buf(),
                source: e,
            })?;
        if !metadata.is_file() {
            continue;
        }

        files.push(name);
    }

    if options.sort {
        files.sort();
    }

    Ok(files)
}
