//! Dependency version upgrades across a set of scripts
//!
//! The upgrader scans a file set for dependency declarations of a target
//! library, then rewrites every script still carrying a different version.
//! Rewrites are grouped by file so each file is read and written exactly
//! once per run, even when it declares the same dependency several times;
//! parallelism is across files only.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use futures::StreamExt;
use walkdir::WalkDir;

use crate::{
    scan::{dependencies_in_file, Dependency},
    Config, Error, Framework, Result,
};

/// A library identified by `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// The groupId
    pub group: String,
    /// The artifactId
    pub artifact: String,
}

impl Library {
    /// Whether the dependency record refers to this library.
    #[must_use]
    pub fn matches(&self, dependency: &Dependency) -> bool {
        dependency.group == self.group && dependency.artifact == self.artifact
    }
}

impl FromStr for Library {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => Ok(Self {
                group: (*group).to_string(),
                artifact: (*artifact).to_string(),
            }),
            _ => Err(Error::InvalidInput(format!(
                "The library must specify groupId:artifactId (not {s})"
            ))),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

fn is_script(name: &str, config: &Config) -> bool {
    config
        .script_extensions
        .iter()
        .any(|extension| name.ends_with(extension))
}

/// Finds all scripts located in the working directory and the immediate
/// search directories.
#[must_use]
pub fn find_nearby_scripts(framework: &Framework, config: &Config) -> Vec<PathBuf> {
    let base = framework.working_dir();
    let dirs = std::iter::once(base.clone())
        .chain(framework.search_dirs.iter().map(|dir| base.join(dir)));

    dirs.flat_map(|dir| {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| is_script(name, config))
            })
            .collect();
        files.sort();
        files
    })
    .collect()
}

/// Finds all scripts below the scope directory.
///
/// Hidden directories are not entered and traversal depth is bounded by the
/// configured maximum.
#[must_use]
pub fn find_scripts_within_scope(scope: &Path, config: &Config) -> Vec<PathBuf> {
    WalkDir::new(scope)
        .max_depth(config.scope_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| entry.file_type().is_dir() && name.starts_with('.'))
        })
        .filter_map(std::result::Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| is_script(name, config))
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Returns the dependency records across `scripts` that refer to `library`
/// at any version other than `version`.
///
/// # Errors
///
/// Returns [`Error::Io`] when one of the scripts cannot be read.
pub fn plan_upgrade(
    scripts: &[PathBuf],
    library: &Library,
    version: &str,
) -> Result<Vec<Dependency>> {
    let mut upgradable = Vec::new();
    for script in scripts {
        let dependencies = dependencies_in_file(script)?;
        upgradable.extend(
            dependencies
                .into_iter()
                .filter(|dep| library.matches(dep) && dep.version != version),
        );
    }

    Ok(upgradable)
}

/// Rewrites every script named by `records` to the target `version`,
/// returning the files that changed.
///
/// Records are grouped by file first; each file receives all of its
/// replacements within one exclusive read-modify-write. Files are processed
/// concurrently on a pool sized to the available processing units, and the
/// call completes only once every file has been handled. Ordering between
/// files is unspecified.
///
/// # Errors
///
/// Returns [`Error::Io`] when a script cannot be read or written back.
pub async fn apply_upgrades(records: &[Dependency], version: &str) -> Result<Vec<PathBuf>> {
    let mut by_file: BTreeMap<PathBuf, Vec<(String, String)>> = BTreeMap::new();
    for record in records {
        let replacement = (record.spec(), record.with_version(version).spec());
        let replacements = by_file.entry(record.script.clone()).or_default();
        if !replacements.contains(&replacement) {
            replacements.push(replacement);
        }
    }

    let workers = std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get);

    let results: Vec<Result<Option<PathBuf>>> = futures::stream::iter(by_file)
        .map(|(path, replacements)| async move {
            rewrite_file(&path, &replacements)
                .await
                .map(|changed| changed.then_some(path))
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    let mut rewritten = Vec::new();
    for result in results {
        if let Some(path) = result? {
            rewritten.push(path);
        }
    }

    rewritten.sort();
    Ok(rewritten)
}

/// Applies literal text replacements to a file, writing the whole contents
/// back only when something changed.
async fn rewrite_file(path: &Path, replacements: &[(String, String)]) -> Result<bool> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Io(format!("Failed to read {}: {e}", path.display())))?;

    let mut updated = contents.clone();
    for (old, new) in replacements {
        updated = updated.replace(old.as_str(), new.as_str());
    }

    if updated == contents {
        return Ok(false);
    }

    tokio::fs::write(path, updated)
        .await
        .map_err(|e| Error::Io(format!("Failed to write {}: {e}", path.display())))?;

    Ok(true)
}
