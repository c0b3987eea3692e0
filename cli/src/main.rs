mod args;
mod commands;
mod error;
mod stream;

use args::{Cli, Commands};
use asciify::ScalingAlgorithm;
use clap::{CommandFactory, FromArgMatches};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Configure logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let result = match cli.command {
        Commands::Convert(args) => commands::convert(args),
        Commands::Preview(args) => commands::preview(args),
        Commands::Cam(args) => commands::cam(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("asciify: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments, with the algorithm help listing the choices in order
fn parse_cli() -> Result<Cli, clap::Error> {
    let help = ScalingAlgorithm::help_text();
    let command = Cli::command()
        .mut_subcommand("convert", |c| c.mut_arg("algorithm", |a| a.help(help.clone())))
        .mut_subcommand("preview", |c| c.mut_arg("algorithm", |a| a.help(help.clone())));
    Cli::from_arg_matches(&command.get_matches())
}
