//! Aggregation of commands across the search path
//!
//! Each directory on the search path contributes at most one command per
//! script: the one whose declared name matches the filename. The catch-all
//! script is skipped there, but when a search path entry is a plain file all
//! of its command markers are kept, which is how the catch-all exposes
//! several commands from a single script.

use std::path::{Path, PathBuf};

use crate::{
    scan::{commands_in_file, Command},
    Config, Framework,
};

/// Returns true if `path` lies strictly below `ancestor`.
#[must_use]
pub fn is_descendant(path: &Path, ancestor: &Path) -> bool {
    path.ancestors().skip(1).any(|parent| parent == ancestor)
}

/// Returns the canonical commands stored in a directory.
///
/// Immediate script files are scanned and the command whose name matches the
/// filename (case-insensitive, extension stripped) becomes the script's
/// canonical command. A script without a matching marker still yields a
/// command named after the file, with an empty description. The catch-all
/// script is never included here.
#[must_use]
pub fn commands_in_directory(directory: &Path, config: &Config) -> Vec<Command> {
    let Ok(entries) = std::fs::read_dir(directory) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    name.ends_with(&config.command_extension) && name != config.catch_all
                })
        })
        .collect();

    // Directory listing order is platform-dependent; make discovery stable.
    files.sort();

    files
        .into_iter()
        .filter_map(|file| {
            let name = file.file_name()?.to_str()?;
            let stem = name
                .strip_suffix(&config.command_extension)
                .unwrap_or(name)
                .to_string();

            let commands = match commands_in_file(&file) {
                Ok(commands) => commands,
                Err(error) => {
                    tracing::debug!("Skipping unreadable script {}: {error}", file.display());
                    return None;
                }
            };

            commands
                .into_iter()
                .find(|command| command.name.eq_ignore_ascii_case(&stem))
                .or(Some(Command {
                    name: stem,
                    description: String::new(),
                    script: file,
                }))
        })
        .collect()
}

/// Returns the available commands found on the search path.
///
/// Directories contribute their canonical commands, file entries contribute
/// every command they declare. Missing or unreadable entries are skipped. If
/// `ancestor` is supplied, only commands whose script lies below it are
/// returned. The result is sorted by name, case-insensitive, with discovery
/// order breaking ties.
#[must_use]
pub fn available_commands(
    framework: &Framework,
    config: &Config,
    ancestor: Option<&Path>,
) -> Vec<Command> {
    let Some(search_path) = framework.search_path.as_ref() else {
        return Vec::new();
    };

    let mut commands: Vec<Command> = search_path
        .iter()
        .flat_map(|entry| {
            if entry.is_dir() {
                commands_in_directory(entry, config)
            } else if entry.is_file() {
                commands_in_file(entry).unwrap_or_else(|error| {
                    tracing::debug!("Skipping search path entry {}: {error}", entry.display());
                    Vec::new()
                })
            } else {
                Vec::new()
            }
        })
        .filter(|command| ancestor.map_or(true, |dir| is_descendant(&command.script, dir)))
        .collect();

    commands.sort_by_key(|command| command.name.to_lowercase());
    commands
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn framework_with_path(entries: Vec<PathBuf>) -> Framework {
        Framework {
            search_path: Some(entries),
            ..Framework::default()
        }
    }

    #[test]
    fn test_directory_keeps_only_filename_matching_command() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        write_script(
            dir.path(),
            "TestTwo.kts",
            "//CMD testTwo Test with a single dependency\n//CMD invalid INVALID COMMAND\n",
        );

        let commands = commands_in_directory(dir.path(), &config);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "testTwo");
        assert_eq!(commands[0].description, "Test with a single dependency");
    }

    #[test]
    fn test_directory_synthesizes_command_without_marker() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        write_script(dir.path(), "Deploy.kts", "println(\"deploying\")\n");

        let commands = commands_in_directory(dir.path(), &config);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "Deploy");
        assert_eq!(commands[0].description, "");
    }

    #[test]
    fn test_directory_excludes_catch_all_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        write_script(dir.path(), "ko.kts", "//CMD hello Say Hello\n");
        write_script(dir.path(), "Build.kt", "//CMD build Build it\n");
        write_script(dir.path(), "One.kts", "//CMD one One\n");

        let commands = commands_in_directory(dir.path(), &config);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "one");
    }

    #[test]
    fn test_file_entry_keeps_all_commands() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let catch_all = write_script(
            dir.path(),
            "ko.kts",
            "//CMD hello Say Hello\n//CMD goodbye Say Goodbye\n",
        );

        let framework = framework_with_path(vec![catch_all]);
        let commands = available_commands(&framework, &config, None);
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["goodbye", "hello"]);
    }

    #[test]
    fn test_available_commands_sorted_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        write_script(dir.path(), "Zulu.kts", "//CMD Zulu Last letter\n");
        write_script(dir.path(), "alpha.kts", "//CMD alpha First letter\n");
        write_script(dir.path(), "Mike.kts", "//CMD Mike Middle letter\n");

        let framework = framework_with_path(vec![dir.path().to_path_buf()]);
        let commands = available_commands(&framework, &config, None);
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn test_missing_search_path_yields_empty() {
        let config = Config::default();
        let framework = Framework::default();
        assert!(available_commands(&framework, &config, None).is_empty());
    }

    #[test]
    fn test_missing_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        write_script(dir.path(), "One.kts", "//CMD one One\n");

        let framework = framework_with_path(vec![
            PathBuf::from("/nonexistent/path"),
            dir.path().to_path_buf(),
        ]);
        let commands = available_commands(&framework, &config, None);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_ancestor_filter() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let inside = dir.path().join("module");
        fs::create_dir(&inside).unwrap();
        write_script(&inside, "In.kts", "//CMD in Inside\n");

        let other = TempDir::new().unwrap();
        write_script(other.path(), "Out.kts", "//CMD out Outside\n");

        let framework =
            framework_with_path(vec![inside.clone(), other.path().to_path_buf()]);

        let all = available_commands(&framework, &config, None);
        assert_eq!(all.len(), 2);

        let scoped = available_commands(&framework, &config, Some(dir.path()));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].name, "in");
    }

    #[test]
    fn test_is_descendant() {
        assert!(is_descendant(Path::new("/a/b/c.kts"), Path::new("/a")));
        assert!(is_descendant(Path::new("/a/b/c.kts"), Path::new("/a/b")));
        assert!(!is_descendant(Path::new("/a/b/c.kts"), Path::new("/a/b/c.kts")));
        assert!(!is_descendant(Path::new("/a/b/c.kts"), Path::new("/x")));
    }
}
