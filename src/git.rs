//! Source revision lookup for version stamps.

use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryOpenFlags};

/// Number of hex digits in a short revision.
pub const SHORT_REVISION_LEN: usize = 7;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum GitError {
    #[error("no git repository found at or above {path}: {source}")]
    RepoNotFound { path: PathBuf, source: git2::Error },

    #[error("failed to resolve HEAD in {path}: {source}")]
    HeadUnresolved { path: PathBuf, source: git2::Error },
}

// =============================================================================
// Revision lookup
// =============================================================================

/// The short id of the commit `HEAD` points at, in the repository that
/// encloses `path`.
///
/// The search walks up from `path` through parent directories, like `git`
/// itself does.
pub fn short_revision(path: &Path) -> Result<String, GitError> {
    short_revision_within(path, &[] as &[&Path])
}

/// Like [`short_revision`], but never searches at or above `ceilings`.
pub fn short_revision_within(path: &Path, ceilings: &[&Path]) -> Result<String, GitError> {
    let repo = Repository::open_ext(path, RepositoryOpenFlags::empty(), ceilings).map_err(|e| {
        GitError::RepoNotFound {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let head_unresolved = |e| GitError::HeadUnresolved {
        path: path.to_path_buf(),
        source: e,
    };
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(head_unresolved)?;

    let mut revision = commit.id().to_string();
    revision.truncate(SHORT_REVISION_LEN);
    Ok(revision)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Create a repository in `dir` with a single empty commit on `HEAD`.
    pub(crate) fn init_repo_with_commit(dir: &Path) -> git2::Oid {
        let repo = Repository::init(dir).unwrap();
        let signature = git2::Signature::now("Docs Bot", "docs@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .unwrap()
    }

    #[test]
    fn test_short_revision() {
        let dir = tempfile::tempdir().unwrap();
        let oid = init_repo_with_commit(dir.path());

        let revision = short_revision(dir.path()).unwrap();

        assert_eq!(revision.len(), SHORT_REVISION_LEN);
        assert!(oid.to_string().starts_with(&revision));
    }

    #[test]
    fn test_short_revision_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let oid = init_repo_with_commit(dir.path());
        let nested = dir.path().join("docs").join("chapters");
        std::fs::create_dir_all(&nested).unwrap();

        let revision = short_revision(&nested).unwrap();

        assert!(oid.to_string().starts_with(&revision));
    }

    #[test]
    fn test_short_revision_without_repository() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project");
        std::fs::create_dir(&project).unwrap();

        let result = short_revision_within(&project, &[dir.path()]);

        assert!(matches!(result, Err(GitError::RepoNotFound { .. })));
    }

    #[test]
    fn test_short_revision_without_commits() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let result = short_revision(dir.path());

        assert!(matches!(result, Err(GitError::HeadUnresolved { .. })));
    }
}
