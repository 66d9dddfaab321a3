//! Version-control adapters selected from the repository marker file

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{process::run, Error, Result};

/// A source code repository recognized by its root marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repository {
    /// Git repository (`.git` marker)
    Git {
        /// The `.git` marker path
        marker: PathBuf,
    },
    /// Unrecognized repository kind
    Other {
        /// The marker path
        marker: PathBuf,
    },
}

impl Repository {
    /// Selects the repository kind appropriate for the marker file.
    #[must_use]
    pub fn detect(marker: &Path) -> Self {
        let name = marker
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if name == ".git" {
            Self::Git {
                marker: marker.to_path_buf(),
            }
        } else {
            Self::Other {
                marker: marker.to_path_buf(),
            }
        }
    }

    /// The repository root directory.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::Git { marker } | Self::Other { marker } => marker.parent(),
        }
    }

    /// Returns whether changes are detected in the repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] when git cannot be started or reports
    /// failure, and [`Error::InvalidInput`] for non-git repositories.
    pub async fn has_changes(&self, timeout: Duration) -> Result<bool> {
        let output = self.git(&["status", "--porcelain"], timeout).await?;
        Ok(!output.trim().is_empty())
    }

    /// Stages the given paths.
    ///
    /// # Errors
    ///
    /// See [`Repository::has_changes`].
    pub async fn add(&self, paths: &[&str], timeout: Duration) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args, timeout).await.map(|_| ())
    }

    /// Records a commit with the given message.
    ///
    /// # Errors
    ///
    /// See [`Repository::has_changes`].
    pub async fn commit(&self, message: &str, timeout: Duration) -> Result<()> {
        self.git(&["commit", "-m", message], timeout).await.map(|_| ())
    }

    /// Creates a new tag or moves an existing tag with the same name.
    ///
    /// # Errors
    ///
    /// See [`Repository::has_changes`].
    pub async fn tag(&self, tag: &str, timeout: Duration) -> Result<()> {
        self.git(&["tag", "-a", "-f", tag, "-m", tag], timeout)
            .await
            .map(|_| ())
    }

    async fn git(&self, args: &[&str], timeout: Duration) -> Result<String> {
        let Self::Git { .. } = self else {
            return Err(Error::InvalidInput(
                "The current repository is not a git repository".to_string(),
            ));
        };

        let output = run("git", args, self.root(), timeout).await?;
        if output.success() {
            Ok(output.output)
        } else {
            Err(Error::command(
                "git",
                format!("git {} failed: {}", args.join(" "), output.output.trim()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_git() {
        let repo = Repository::detect(Path::new("/work/app/.git"));
        assert!(matches!(repo, Repository::Git { .. }));
        assert_eq!(repo.root(), Some(Path::new("/work/app")));
    }

    #[test]
    fn test_detect_other() {
        let repo = Repository::detect(Path::new("/work/app/.hg"));
        assert!(matches!(repo, Repository::Other { .. }));
    }

    #[tokio::test]
    async fn test_non_git_operations_are_rejected() {
        let repo = Repository::detect(Path::new("/work/app/.hg"));
        let err = repo
            .has_changes(Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_git_repository_status() {
        if !crate::process::is_tool_available("git") {
            return;
        }

        let dir = tempfile::TempDir::new().unwrap();
        let init = run(
            "git",
            &["init", "-q"],
            Some(dir.path()),
            Duration::from_secs(10),
        )
        .await
        .unwrap();
        assert!(init.success());

        let repo = Repository::detect(&dir.path().join(".git"));
        assert!(!repo.has_changes(Duration::from_secs(10)).await.unwrap());

        std::fs::write(dir.path().join("file.txt"), "contents").unwrap();
        assert!(repo.has_changes(Duration::from_secs(10)).await.unwrap());
    }
}
