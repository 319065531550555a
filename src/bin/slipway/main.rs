//! slipway CLI - package metadata recipes for C++ libraries

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use slipway::util::diagnostic;
use slipway::RecipeError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<RecipeError>() {
            Some(recipe_err) => diagnostic::emit(&recipe_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => commands::list::execute(),
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Requirements(args) => commands::requirements::execute(args),
        Commands::Graph(args) => commands::graph::execute(args),
        Commands::Definitions(args) => commands::definitions::execute(args),
        Commands::Package(args) => commands::package::execute(args),
        Commands::PackageId(args) => commands::package_id::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
