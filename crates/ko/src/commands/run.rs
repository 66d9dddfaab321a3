//! `ko run` - execute the script matching a command name
//!
//! The script inherits the terminal so interactive commands work, and the
//! child's exit code becomes our own. When no command matches the name, the
//! catch-all script on the search path gets a chance to handle it, receiving
//! the name as its first argument.

use std::{ffi::OsStr, path::PathBuf, process};

use anyhow::Result;
use clap::ArgMatches;
use ko_core::{resolve::search_for_command, scan::provides_help, Config, Error, Framework};

pub async fn run(framework: &Framework, config: &Config, matches: &ArgMatches) -> Result<()> {
    let words: Vec<&String> = matches
        .get_many("command")
        .map(Iterator::collect)
        .unwrap_or_default();
    let Some((&name, args)) = words.split_first() else {
        return Err(Error::InvalidInput("No command given".to_string()).into());
    };

    let (script, script_args) = select_script(framework, config, name, args)?;

    // Scripts opt in to --help handling with a marker; without it we answer
    // on their behalf instead of running the script with a flag it ignores.
    let wants_help = args.iter().any(|arg| matches!(arg.as_str(), "--help" | "-h"));
    if wants_help && !provides_help(&script)? {
        println!("{name} does not provide usage information");
        return Ok(());
    }

    let status = tokio::process::Command::new(&script)
        .args(&script_args)
        .env("KO_SCRIPT", &script)
        .status()
        .await
        .map_err(|e| Error::command(script.to_string_lossy(), e.to_string()))?;

    let code = status.code().unwrap_or(1);
    if code != 0 {
        #[allow(clippy::exit)]
        process::exit(code);
    }

    Ok(())
}

/// Picks the script to execute and the arguments to pass it.
///
/// A resolved command runs its own script with the user's arguments. The
/// catch-all script, whether resolved through a search path file entry or
/// used as the not-found fallback, additionally receives the command name
/// so it can dispatch internally.
fn select_script(
    framework: &Framework,
    config: &Config,
    name: &str,
    args: &[&String],
) -> Result<(PathBuf, Vec<String>)> {
    let forwarded = |prefix: Option<&str>| {
        prefix
            .map(str::to_string)
            .into_iter()
            .chain(args.iter().map(|arg| (*arg).clone()))
            .collect::<Vec<String>>()
    };

    match search_for_command(framework, config, name, None) {
        Ok(command) => {
            let is_catch_all = command
                .script
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|file| file == config.catch_all);
            let prefix = is_catch_all.then_some(command.name.as_str());
            Ok((command.script.clone(), forwarded(prefix)))
        }
        Err(Error::CommandNotFound(_)) => match find_catch_all(framework, config) {
            Some(script) => Ok((script, forwarded(Some(name)))),
            None => Err(Error::CommandNotFound(name.to_string()).into()),
        },
        Err(err) => Err(err.into()),
    }
}

/// Locates the catch-all script on the search path, either as a file entry
/// or inside a directory entry.
fn find_catch_all(framework: &Framework, config: &Config) -> Option<PathBuf> {
    let search_path = framework.search_path.as_ref()?;

    search_path.iter().find_map(|entry| {
        if entry.is_file() {
            entry
                .file_name()
                .and_then(OsStr::to_str)
                .filter(|file| *file == config.catch_all)
                .map(|_| entry.clone())
        } else {
            let candidate = entry.join(&config.catch_all);
            candidate.is_file().then_some(candidate)
        }
    })
}
