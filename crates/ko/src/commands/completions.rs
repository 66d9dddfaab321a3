//! `ko completions` - generate shell completion scripts

use std::io;

use anyhow::Result;
use clap::ArgMatches;
use clap_complete::Shell;
use ko_core::Error;

use crate::cli::build_cli;

pub fn run(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("shell")
        .map(String::as_str)
        .unwrap_or_default();

    let shell: Shell = name
        .parse()
        .map_err(|_| Error::InvalidInput(format!("Unsupported shell: {name}")))?;

    clap_complete::generate(shell, &mut build_cli(), "ko", &mut io::stdout());
    Ok(())
}
