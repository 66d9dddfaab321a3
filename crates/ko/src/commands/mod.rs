//! Subcommand handlers

pub mod completions;
pub mod list;
pub mod run;
pub mod upgrade;
pub mod which;

use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use ko_core::framework::Scope;
use ko_core::Framework;

/// Maps the mutually exclusive scope flags to a [`Scope`], if one was given.
fn scope_from_matches(matches: &ArgMatches) -> Option<Scope> {
    if matches.get_flag("repo") {
        Some(Scope::Repo)
    } else if matches.get_flag("project") {
        Some(Scope::Project)
    } else if matches.get_flag("module") {
        Some(Scope::Module)
    } else {
        None
    }
}

/// Resolves the requested scope to its directory, or `None` when no scope
/// flag was given.
fn scope_ancestor<'a>(framework: &'a Framework, matches: &ArgMatches) -> Result<Option<&'a Path>> {
    match scope_from_matches(matches) {
        Some(scope) => Ok(Some(framework.scope_dir(scope)?)),
        None => Ok(None),
    }
}
