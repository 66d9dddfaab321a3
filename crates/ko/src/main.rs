//! Ko CLI - discoverable command runner for project scripts
//!
//! Binary name: `ko`

use std::process;

mod cli;
mod commands;
mod output;

use cli::{format_error, run_cli};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_cli().await {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {}", format_error(&err));
        }

        let code = err
            .downcast_ref::<ko_core::Error>()
            .map_or(1, ko_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
