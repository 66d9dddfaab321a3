//! `ko upgrade` - rewrite dependency declarations to a new version

use anyhow::Result;
use clap::ArgMatches;
use ko_core::{
    upgrade::{apply_upgrades, find_nearby_scripts, find_scripts_within_scope, plan_upgrade, Library},
    Config, Error, Framework,
};

use crate::output::Table;

const DEFAULT_LIBRARY: &str = "io.alphalon.kotlin:kotlin-scripting";

pub async fn run(framework: &Framework, config: &Config, matches: &ArgMatches) -> Result<()> {
    let quiet = matches.get_flag("quiet");
    let dry_run = matches.get_flag("dry-run");

    let version = matches
        .get_one::<String>("version")
        .cloned()
        .unwrap_or_else(|| framework.version.clone());
    if version.is_empty() {
        return Err(Error::InvalidInput(
            "Could not determine the version to upgrade to".to_string(),
        )
        .into());
    }

    // Validate the library before touching the filesystem.
    let library: Library = matches
        .get_one::<String>("library")
        .map_or(DEFAULT_LIBRARY, String::as_str)
        .parse()?;

    let scripts = match super::scope_ancestor(framework, matches)? {
        Some(scope_dir) => find_scripts_within_scope(scope_dir, config),
        None => find_nearby_scripts(framework, config),
    };

    let plan = plan_upgrade(&scripts, &library, &version)?;
    if plan.is_empty() {
        if !quiet {
            println!("Could not find any scripts to upgrade");
        }
        return Ok(());
    }

    if !quiet {
        println!("Upgrading to {library}:{version}");
    }

    if dry_run {
        let mut table = Table::with_header(&["Script", "Current Version"]);
        for record in &plan {
            table.add_row(&[&record.script.to_string_lossy(), &record.version]);
        }
        print!("{}", table.render());
        return Ok(());
    }

    let rewritten = apply_upgrades(&plan, &version).await?;
    if !quiet {
        for script in &rewritten {
            println!("Upgraded {}", script.display());
        }
    }

    Ok(())
}
