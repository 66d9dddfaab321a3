//! `ko list` - print the commands available on the search path

use anyhow::Result;
use clap::ArgMatches;
use ko_core::{index::available_commands, Config, Framework};

use crate::output::Table;

pub fn run(framework: &Framework, config: &Config, matches: &ArgMatches) -> Result<()> {
    let ancestor = super::scope_ancestor(framework, matches)?;
    let commands = available_commands(framework, config, ancestor);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    if commands.is_empty() {
        println!("No commands found");
        return Ok(());
    }

    let mut table = Table::new();
    for command in &commands {
        table.add_row(&[&command.name, &command.description]);
    }
    print!("{}", table.render());

    Ok(())
}
