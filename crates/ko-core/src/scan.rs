//! Line-oriented extraction of markers from script text
//!
//! Scripts declare commands and dependencies through fixed marker lines:
//!
//! ```text
//! //CMD publish - Publishes the project after running tests
//! //DEPS io.alphalon.kotlin:kotlin-scripting:0.2.0, io.ktor:ktor-client:1.0.0
//! @file:DependsOn("org.slf4j:slf4j-api:1.7.25")
//! //HELP
//! ```
//!
//! Scanning is read-only and lenient: lines that merely resemble a marker
//! produce no record. Only failing to read the file itself is an error.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

/// A command found on the search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// The command name found inside the script or derived from the filename
    pub name: String,
    /// The command description found inside the script, may be empty
    pub description: String,
    /// The script file
    pub script: PathBuf,
}

/// A single declared dependency in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// The script file
    pub script: PathBuf,
    /// The groupId
    pub group: String,
    /// The artifactId
    pub artifact: String,
    /// The version
    pub version: String,
}

impl Dependency {
    /// The `group:artifact` string representing a library.
    #[must_use]
    pub fn library(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// The `group:artifact:version` string representing an instance of a
    /// library.
    #[must_use]
    pub fn spec(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// A new record with the same library at a different version. The
    /// original is never mutated.
    #[must_use]
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..self.clone()
        }
    }
}

fn command_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*//CMD\s*([-\w]*)\s*-?\s*(.*)").ok())
        .as_ref()
}

fn dependency_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*//DEPS\s*(.*)$|^\s*@file:DependsOn\((.*)\)").ok())
        .as_ref()
}

fn help_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*//HELP").ok()).as_ref()
}

fn read_script(script: &Path) -> Result<String> {
    std::fs::read_to_string(script)
        .map_err(|e| Error::Io(format!("Failed to read {}: {e}", script.display())))
}

/// Returns the commands listed in a script file, in file order.
///
/// A marker line without a name produces no record.
///
/// # Errors
///
/// Returns [`Error::Io`] when the script cannot be read.
pub fn commands_in_file(script: &Path) -> Result<Vec<Command>> {
    let text = read_script(script)?;
    let Some(regex) = command_regex() else {
        return Ok(Vec::new());
    };

    let commands = text
        .lines()
        .filter_map(|line| {
            let captures = regex.captures(line)?;
            let name = captures.get(1).map_or("", |m| m.as_str());
            if name.is_empty() {
                return None;
            }

            Some(Command {
                name: name.to_string(),
                description: captures.get(2).map_or("", |m| m.as_str()).to_string(),
                script: script.to_path_buf(),
            })
        })
        .collect();

    Ok(commands)
}

/// Returns the dependencies declared in a script file.
///
/// Each comma-separated token is trimmed of whitespace and surrounding
/// quotes, then split on `:`; tokens that do not yield exactly three
/// non-empty parts are dropped without error.
///
/// # Errors
///
/// Returns [`Error::Io`] when the script cannot be read.
pub fn dependencies_in_file(script: &Path) -> Result<Vec<Dependency>> {
    let text = read_script(script)?;
    let Some(regex) = dependency_regex() else {
        return Ok(Vec::new());
    };

    let dependencies = text
        .lines()
        .filter_map(|line| {
            let captures = regex.captures(line)?;
            captures
                .get(1)
                .or_else(|| captures.get(2))
                .map(|m| m.as_str())
        })
        .flat_map(|list| list.split(',').map(str::to_string).collect::<Vec<_>>())
        .filter_map(|token| parse_dependency(script, &token))
        .collect();

    Ok(dependencies)
}

/// Parses a single `group:artifact:version` token, dropping malformed ones.
fn parse_dependency(script: &Path, token: &str) -> Option<Dependency> {
    let token = token.trim_matches(|c: char| c == ' ' || c == '"');
    let parts: Vec<&str> = token.split(':').map(str::trim).collect();

    match parts.as_slice() {
        [group, artifact, version]
            if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
        {
            Some(Dependency {
                script: script.to_path_buf(),
                group: (*group).to_string(),
                artifact: (*artifact).to_string(),
                version: (*version).to_string(),
            })
        }
        _ => None,
    }
}

/// Returns whether the script supports the `--help` option.
///
/// # Errors
///
/// Returns [`Error::Io`] when the script cannot be read.
pub fn provides_help(script: &Path) -> Result<bool> {
    let text = read_script(script)?;
    let Some(regex) = help_regex() else {
        return Ok(false);
    };

    Ok(text.lines().any(|line| regex.is_match(line)))
}
