//! Build-system adapters selected from the project marker file
//!
//! The project kind is a closed set chosen once by [`Project::detect`];
//! callers interact with the common clean/test/invoke surface and never
//! branch on the build system themselves.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
    time::Duration,
};

use regex::Regex;

use crate::{
    process::{run, ExecOutput},
    Error, Result,
};

/// A project recognized by its build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Project {
    /// Gradle project (`build.gradle` or `build.gradle.kts`)
    Gradle {
        /// The build file
        build_file: PathBuf,
    },
    /// Maven project (`pom.xml`)
    Maven {
        /// The build file
        build_file: PathBuf,
    },
    /// Unrecognized build system
    Other {
        /// The marker file
        build_file: PathBuf,
    },
}

impl Project {
    /// Selects the project kind appropriate for the marker file.
    #[must_use]
    pub fn detect(build_file: &Path) -> Self {
        let name = build_file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        match name {
            "build.gradle" | "build.gradle.kts" => Self::Gradle {
                build_file: build_file.to_path_buf(),
            },
            "pom.xml" => Self::Maven {
                build_file: build_file.to_path_buf(),
            },
            _ => Self::Other {
                build_file: build_file.to_path_buf(),
            },
        }
    }

    /// The build file that identified this project.
    #[must_use]
    pub fn build_file(&self) -> &Path {
        match self {
            Self::Gradle { build_file } | Self::Maven { build_file } | Self::Other { build_file } => {
                build_file
            }
        }
    }

    /// The project directory.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.build_file().parent()
    }

    /// The declared project version, when the build system can report one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] when the build tool cannot be started.
    pub async fn version(&self, timeout: Duration) -> Result<Option<String>> {
        match self {
            Self::Gradle { .. } => {
                static RE: OnceLock<Option<Regex>> = OnceLock::new();
                let regex = RE.get_or_init(|| Regex::new(r"^version: (.*)").ok());

                let output = self.invoke(&["properties", "-q"], timeout).await?;
                Ok(regex.as_ref().and_then(|re| {
                    output.output.lines().find_map(|line| {
                        re.captures(line)
                            .and_then(|caps| caps.get(1))
                            .map(|m| m.as_str().trim().to_string())
                    })
                }))
            }
            Self::Maven { .. } | Self::Other { .. } => Ok(None),
        }
    }

    /// Cleans the project, returning whether the build tool succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] when the build tool cannot be started.
    pub async fn clean(&self, timeout: Duration) -> Result<bool> {
        match self {
            Self::Other { .. } => Ok(false),
            _ => Ok(self.invoke(&["clean"], timeout).await?.success()),
        }
    }

    /// Runs the project tests, returning whether they passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Command`] when the build tool cannot be started.
    pub async fn test(&self, timeout: Duration) -> Result<bool> {
        match self {
            Self::Other { .. } => Ok(false),
            _ => Ok(self.invoke(&["test"], timeout).await?.success()),
        }
    }

    /// Executes the build tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unrecognized build system, or
    /// [`Error::Command`] when the tool cannot be started.
    pub async fn invoke(&self, args: &[&str], timeout: Duration) -> Result<ExecOutput> {
        let program = match self {
            Self::Gradle { build_file } => gradle_command(build_file.parent()),
            Self::Maven { .. } => "mvn".to_string(),
            Self::Other { build_file } => {
                return Err(Error::InvalidInput(format!(
                    "No known build tool for {}",
                    build_file.display()
                )))
            }
        };

        run(&program, args, self.dir(), timeout).await
    }
}

/// Prefers the Gradle wrapper when one is present next to the build file.
fn gradle_command(dir: Option<&Path>) -> String {
    let wrapper = dir.map(|d| d.join("gradlew"));
    if wrapper.as_deref().is_some_and(Path::exists) {
        "./gradlew".to_string()
    } else {
        "gradle".to_string()
    }
}
