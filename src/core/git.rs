//! Local git repository operations
//!
//! This module provides a wrapper around git2 for the read-only queries the
//! commit pipeline needs:
//! - Repository discovery
//! - Staged diff generation
//! - The most recent commit message

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::{DiffOptions, Repository};

use crate::error::{GemcommitError, Result};

/// Where staged changes and commit history come from
#[async_trait(?Send)]
pub trait DiffSource {
    /// Unified diff of everything staged for the next commit
    async fn staged_diff(&self) -> Result<String>;

    /// Full message of the most recent commit, if there is one
    async fn last_commit_message(&self) -> Result<Option<String>>;
}

/// Wrapper for local git repository operations
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the git repository in the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Discover a git repository from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| GemcommitError::NotGitRepository)?;
        Ok(Self { repo })
    }

    /// Get the repository root directory
    pub fn root_dir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or(GemcommitError::NotGitRepository)
    }

    /// Get the diff of staged changes.
    ///
    /// Before the first commit there is no HEAD tree, so the index is
    /// compared against the empty tree.
    pub fn staged_diff_text(&self) -> Result<String> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if is_unborn(&e) => None,
            Err(e) => return Err(e.into()),
        };
        // The repository caches its index; pick up staging done since open
        let mut index = self.repo.index()?;
        index.read(false)?;

        let diff = self.repo.diff_tree_to_index(
            head_tree.as_ref(),
            Some(&index),
            Some(&mut DiffOptions::new()),
        )?;

        let mut diff_text = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            // Patch output carries the origin marker separately for content lines
            match line.origin() {
                '+' | '-' | ' ' => diff_text.push(line.origin()),
                _ => {}
            }
            diff_text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(diff_text)
    }

    /// Get the message of the HEAD commit, or None when there are no commits
    pub fn head_commit_message(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_unborn(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let commit = head.peel_to_commit()?;
        Ok(commit.message().map(|m| m.to_string()))
    }
}

#[async_trait(?Send)]
impl DiffSource for GitRepository {
    async fn staged_diff(&self) -> Result<String> {
        self.staged_diff_text()
    }

    async fn last_commit_message(&self) -> Result<Option<String>> {
        self.head_commit_message()
    }
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn stage(repo: &Repository, dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    fn commit(repo: &Repository, message: &str) {
        let mut index = repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<git2::Commit> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap();
    }

    #[test]
    fn test_discover_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitRepository::discover(dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, GemcommitError::NotGitRepository));
    }

    #[test]
    fn test_staged_diff_before_first_commit() {
        let (dir, repo) = init_repo();
        stage(&repo, dir.path(), "hello.txt", "hello\n");

        let git = GitRepository::discover(dir.path()).unwrap();
        let diff = git.staged_diff_text().unwrap();
        assert!(diff.contains("diff --git a/hello.txt b/hello.txt"));
        assert!(diff.contains("+hello"));
        assert_eq!(git.head_commit_message().unwrap(), None);
    }

    #[test]
    fn test_staged_diff_and_last_message_after_commit() {
        let (dir, repo) = init_repo();
        stage(&repo, dir.path(), "a.txt", "one\n");
        commit(&repo, "feat: first\n\nbody text\n");

        let git = GitRepository::discover(dir.path()).unwrap();
        assert_eq!(git.staged_diff_text().unwrap(), "");
        assert_eq!(
            git.head_commit_message().unwrap().as_deref(),
            Some("feat: first\n\nbody text\n")
        );

        stage(&repo, dir.path(), "a.txt", "two\n");
        let diff = git.staged_diff_text().unwrap();
        assert!(diff.contains("-one"));
        assert!(diff.contains("+two"));
    }

    #[test]
    fn test_root_dir() {
        let (dir, _repo) = init_repo();
        let git = GitRepository::discover(dir.path()).unwrap();
        let root = git.root_dir().unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
