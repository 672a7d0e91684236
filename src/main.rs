mod agents;
mod cli;
mod config;
mod error;
mod logging;
mod notify;
mod package_manager;
mod report;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => workflow::execute_check(&cli.config, cli.verbose, false, None),
        Some(Commands::Check { dry_run, route }) => {
            workflow::execute_check(&cli.config, cli.verbose, dry_run, route.as_deref())
        }
        Some(Commands::List) => workflow::execute_list(cli.verbose),
        Some(Commands::Detect) => workflow::execute_detect(cli.verbose),
        Some(Commands::InstallComplete) => {
            workflow::execute_install_complete(&cli.config, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
