//! CLI entry point and dispatch

pub mod commands;

use anyhow::Result;
pub use commands::build_cli;
use ko_core::{Config, Framework};

/// Parse arguments, build the invocation context once, and route to the
/// matching handler.
pub async fn run_cli() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = Config::load()?;
    let framework = Framework::from_env();

    match matches.subcommand() {
        Some(("list", sub_m)) => crate::commands::list::run(&framework, &config, sub_m),
        Some(("which", sub_m)) => crate::commands::which::run(&framework, &config, sub_m),
        Some(("run", sub_m)) => crate::commands::run::run(&framework, &config, sub_m).await,
        Some(("upgrade", sub_m)) => {
            crate::commands::upgrade::run(&framework, &config, sub_m).await
        }
        Some(("completions", sub_m)) => crate::commands::completions::run(sub_m),
        _ => anyhow::bail!("Unknown command, try 'ko --help'"),
    }
}

/// One-line diagnostic for a failed invocation.
pub fn format_error(err: &anyhow::Error) -> String {
    err.downcast_ref::<ko_core::Error>()
        .map_or_else(|| err.to_string(), std::string::ToString::to_string)
}
