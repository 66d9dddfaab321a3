//! Shared harness for integration tests
//!
//! Each test gets a temporary directory acting as the command search path,
//! and a `ko` invocation stripped of any `KO_*` variables leaking in from
//! the developer's shell.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use tempfile::TempDir;

const KO_VARS: [&str; 10] = [
    "KO_SCRIPT",
    "KO_DIR",
    "KO_REPO",
    "KO_PROJECT",
    "KO_MODULE",
    "KO_REPO_FILE",
    "KO_PROJECT_FILE",
    "KO_SEARCH_PATH",
    "KO_SEARCH_DIRS",
    "KO_VERSION",
];

pub struct Harness {
    dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_script(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[cfg(unix)]
    pub fn write_executable(&self, name: &str, contents: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write_script(name, contents);
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    /// A `ko` invocation with a clean environment and no search path.
    pub fn ko_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("ko").unwrap();
        for name in KO_VARS {
            cmd.env_remove(name);
        }
        cmd
    }

    /// A `ko` invocation whose search path is the harness directory.
    pub fn ko(&self) -> Command {
        let mut cmd = self.ko_bare();
        cmd.env("KO_SEARCH_PATH", self.dir.path());
        cmd
    }

    /// A `ko` invocation running "from" the harness directory, for commands
    /// that search near the working directory.
    pub fn ko_here(&self) -> Command {
        let mut cmd = self.ko_bare();
        cmd.env("KO_DIR", self.dir.path());
        cmd
    }
}
