//! Resolution of a partial command name to exactly one command
//!
//! The ordering of the rules matters and must not be rearranged:
//! prefix filter, then exact-match precedence, then collapsing matches that
//! all carry the same name, and only then ambiguity.

use std::path::Path;

use itertools::Itertools;

use crate::{index::available_commands, scan::Command, Config, Error, Framework, Result};

/// Resolves `name` against a set of available commands.
///
/// # Errors
///
/// Returns [`Error::CommandNotFound`] when nothing matches and
/// [`Error::AmbiguousCommand`] when several genuinely distinct command names
/// share the prefix.
pub fn resolve_command<'a>(commands: &'a [Command], name: &str) -> Result<&'a Command> {
    let matches: Vec<&Command> = commands
        .iter()
        .filter(|command| starts_with_ignore_case(&command.name, name))
        .collect();

    let Some(first) = matches.first() else {
        return Err(Error::CommandNotFound(name.to_string()));
    };

    if matches.len() == 1 {
        return Ok(first);
    }

    // An exact match wins over prefix ambiguity.
    if let Some(exact) = matches
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
    {
        return Ok(exact);
    }

    // Multiple scripts registering the very same name is not ambiguous;
    // the first one encountered wins.
    if matches.iter().map(|command| &command.name).all_equal() {
        return Ok(first);
    }

    Err(Error::AmbiguousCommand {
        name: name.to_string(),
        matches: matches
            .iter()
            .map(|command| command.name.clone())
            .unique()
            .collect(),
    })
}

/// Searches the available commands for `name`, optionally limited to
/// descendants of `ancestor`.
///
/// # Errors
///
/// See [`resolve_command`].
pub fn search_for_command(
    framework: &Framework,
    config: &Config,
    name: &str,
    ancestor: Option<&Path>,
) -> Result<Command> {
    let commands = available_commands(framework, config, ancestor);
    resolve_command(&commands, name).cloned()
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name
            .chars()
            .zip(prefix.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}
