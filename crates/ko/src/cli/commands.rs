//! CLI command definitions using `clap`

use clap::{Arg, ArgGroup, Command as ClapCommand};

fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

fn scope_args(command: ClapCommand) -> ClapCommand {
    command
        .arg(
            Arg::new("repo")
                .short('r')
                .long("repo")
                .action(clap::ArgAction::SetTrue)
                .help("Limit to scripts in the repository"),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .action(clap::ArgAction::SetTrue)
                .help("Limit to scripts in the project"),
        )
        .arg(
            Arg::new("module")
                .short('m')
                .long("module")
                .action(clap::ArgAction::SetTrue)
                .help("Limit to scripts in the module"),
        )
        .group(ArgGroup::new("scope").args(["repo", "project", "module"]))
}

fn cmd_list() -> ClapCommand {
    scope_args(
        ClapCommand::new("list")
            .about("List the commands available on the search path")
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(clap::ArgAction::SetTrue)
                    .help("Output as JSON"),
            )
            .after_help(after_help_text(&[
                "ko list                         List every available command",
                "ko list --project               Commands declared within the project",
                "ko list --json                  Machine-readable command records",
            ])),
    )
}

fn cmd_which() -> ClapCommand {
    scope_args(
        ClapCommand::new("which")
            .about("Resolve a command name to its script")
            .arg(
                Arg::new("name")
                    .required(true)
                    .help("Partial or complete command name"),
            )
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(clap::ArgAction::SetTrue)
                    .help("Output as JSON"),
            )
            .after_help(after_help_text(&[
                "ko which publish                Print the script behind 'publish'",
                "ko which pub                    Prefix matching works the same way",
            ])),
    )
}

fn cmd_run() -> ClapCommand {
    ClapCommand::new("run")
        .about("Run the script matching a command name")
        .arg(
            Arg::new("command")
                .required(true)
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_name("NAME [ARGS]...")
                .help("Partial command name followed by script arguments"),
        )
        .after_help(after_help_text(&[
            "ko run publish                  Run the publish script",
            "ko run pub --help               Show the script's usage, when provided",
            "ko run greet world              Unmatched names fall back to the catch-all script",
        ]))
}

fn cmd_upgrade() -> ClapCommand {
    scope_args(
        ClapCommand::new("upgrade")
            .about("Upgrade scripts to use a new dependency version")
            .long_about(
                "Upgrades scripts to use a new dependency version. By default, it will \
                 set the version for the scripting library to the latest for the scripts \
                 located in the current directory and its immediate search directories.",
            )
            .arg(Arg::new("version").help("Target version, defaults to the framework version"))
            .arg(Arg::new("library").help("Target library as groupId:artifactId"))
            .arg(
                Arg::new("dry-run")
                    .short('d')
                    .long("dry-run")
                    .action(clap::ArgAction::SetTrue)
                    .help("Report what would change without rewriting anything"),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(clap::ArgAction::SetTrue)
                    .help("Quiet mode"),
            )
            .after_help(after_help_text(&[
                "ko upgrade 0.2.0                       Upgrade nearby scripts",
                "ko upgrade 0.2.0 io.ktor:ktor-client   Upgrade a specific library",
                "ko upgrade --repo 0.2.0                Upgrade all scripts in the repository",
                "ko upgrade --dry-run 0.2.0             Preview the rewrite",
            ])),
    )
}

fn cmd_completions() -> ClapCommand {
    ClapCommand::new("completions")
        .about("Generate shell completion scripts")
        .arg(
            Arg::new("shell")
                .required(true)
                .help("Shell to generate completions for (bash, zsh, fish)"),
        )
}

/// Build the top-level CLI.
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("ko")
        .about("Discoverable command runner for project scripts")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(cmd_list())
        .subcommand(cmd_which())
        .subcommand(cmd_run())
        .subcommand(cmd_upgrade())
        .subcommand(cmd_completions())
}
