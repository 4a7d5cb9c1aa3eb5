//! Generation output.

use std::path::{Path, PathBuf};

/// Location and publication details of a generated deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSite {
    local_path: PathBuf,
    repo_url: Option<String>,
    commit_sha: Option<String>,
    pages_url: Option<String>,
}

impl GeneratedSite {
    /// Creates a result for a deliverable that exists only locally.
    #[must_use]
    pub fn local(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            repo_url: None,
            commit_sha: None,
            pages_url: None,
        }
    }

    /// Sets the remote repository URL.
    #[must_use]
    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = Some(repo_url.into());
        self
    }

    /// Sets the commit identifier.
    #[must_use]
    pub fn with_commit_sha(mut self, commit_sha: impl Into<String>) -> Self {
        self.commit_sha = Some(commit_sha.into());
        self
    }

    /// Sets the published-site URL.
    #[must_use]
    pub fn with_pages_url(mut self, pages_url: impl Into<String>) -> Self {
        self.pages_url = Some(pages_url.into());
        self
    }

    /// Returns the local directory holding the deliverable.
    #[must_use]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Returns the remote repository URL, if published.
    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url.as_deref()
    }

    /// Returns the commit identifier, if known.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }

    /// Returns the published-site URL, if published.
    #[must_use]
    pub fn pages_url(&self) -> Option<&str> {
        self.pages_url.as_deref()
    }
}
