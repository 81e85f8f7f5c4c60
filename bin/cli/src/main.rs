mod commands;
mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "graphql-codegen",
    about = "Generate Rust code for executing GraphQL operations",
    version
)]
struct Cli {
    /// Config file path, defaults to `codegen.config.yaml` in the working
    /// directory.
    #[arg(short = 'f', long, global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every configured generator.
    Generate,
    /// Scaffold a config file template.
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate => commands::generate::run(cli.config_file.as_deref()),
        Command::InitConfig => commands::init_config::run(cli.config_file.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        super::Cli::command().debug_assert();
    }
}
