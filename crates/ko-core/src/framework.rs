//! Framework context derived from the calling environment
//!
//! The `ko` shell wrapper exports `KO_*` variables describing the current
//! script, the directory hierarchy (repository, project, module) and the
//! command search path. [`Framework`] captures all of them once at process
//! start and is passed by reference into the indexer, resolver and upgrader.

use std::path::{Path, PathBuf};

use crate::{project::Project, repo::Repository, Error, Result};

/// A directory subtree boundary used to narrow discovery or upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The repository root directory
    Repo,
    /// The top-most project directory
    Project,
    /// The module directory closest to the working directory
    Module,
}

impl Scope {
    /// Human-readable scope name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repo => "repository",
            Self::Project => "project",
            Self::Module => "module",
        }
    }
}

/// Environment-derived state for the currently running invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Framework {
    /// The currently executing script, when called through the `ko` wrapper
    pub script: Option<PathBuf>,
    /// Directory from which the command was run
    pub run_dir: Option<PathBuf>,
    /// Repository root directory
    pub repo_dir: Option<PathBuf>,
    /// Top-most project directory within the repository
    pub project_dir: Option<PathBuf>,
    /// Module directory closest to the working directory
    pub module_dir: Option<PathBuf>,
    /// Repository marker file (e.g. `.git`)
    pub repo_marker: Option<PathBuf>,
    /// Project marker file (e.g. `build.gradle.kts`, `pom.xml`)
    pub project_marker: Option<PathBuf>,
    /// Ordered files and directories consulted to discover commands
    pub search_path: Option<Vec<PathBuf>>,
    /// Names of sibling directories searched for nearby scripts
    pub search_dirs: Vec<String>,
    /// Version of the framework currently in use, may be empty
    pub version: String,
}

impl Framework {
    /// Build the context from `KO_*` environment variables.
    ///
    /// Missing variables leave the corresponding field empty; nothing here
    /// fails, since running outside the wrapper is a supported mode.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            script: env_path("KO_SCRIPT"),
            run_dir: env_path("KO_DIR"),
            repo_dir: env_path("KO_REPO"),
            project_dir: env_path("KO_PROJECT"),
            module_dir: env_path("KO_MODULE"),
            repo_marker: env_path("KO_REPO_FILE"),
            project_marker: env_path("KO_PROJECT_FILE"),
            search_path: env_var("KO_SEARCH_PATH")
                .map(|path| path.split(':').map(PathBuf::from).collect()),
            search_dirs: env_var("KO_SEARCH_DIRS")
                .map(|dirs| dirs.split(':').map(str::to_string).collect())
                .unwrap_or_default(),
            version: env_var("KO_VERSION").unwrap_or_default(),
        }
    }

    /// The repository associated with the repo marker file, if any.
    #[must_use]
    pub fn repo(&self) -> Option<Repository> {
        self.repo_marker.as_deref().map(Repository::detect)
    }

    /// The project associated with the project marker file, if any.
    #[must_use]
    pub fn project(&self) -> Option<Project> {
        self.project_marker.as_deref().map(Project::detect)
    }

    /// Resolve a [`Scope`] to its directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the scope directory is not known
    /// for the current invocation.
    pub fn scope_dir(&self, scope: Scope) -> Result<&Path> {
        let dir = match scope {
            Scope::Repo => self.repo_dir.as_deref(),
            Scope::Project => self.project_dir.as_deref(),
            Scope::Module => self.module_dir.as_deref(),
        };

        dir.ok_or_else(|| {
            Error::InvalidInput(format!("Could not find {} scope", scope.as_str()))
        })
    }

    /// Directory used as the starting point for nearby script searches.
    #[must_use]
    pub fn working_dir(&self) -> PathBuf {
        self.run_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_var(name).map(PathBuf::from)
}
