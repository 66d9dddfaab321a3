//! `ko which` - resolve a command name to its script

use anyhow::Result;
use clap::ArgMatches;
use ko_core::{resolve::search_for_command, Config, Framework};

pub fn run(framework: &Framework, config: &Config, matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or_default();
    let ancestor = super::scope_ancestor(framework, matches)?;

    let command = search_for_command(framework, config, name, ancestor)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&command)?);
    } else {
        println!("{}", command.script.display());
    }

    Ok(())
}
