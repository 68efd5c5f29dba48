//! Prelaunch - isolated runtime bootstrap
//!
//! Command line front end over the `prelaunch` library: runs the bootstrap
//! against a host bundle and manages extracted dependencies.

use std::error::Error as _;

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use prelaunch::error::PrelaunchError;
use prelaunch::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    let forwarder = init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Launch(args) => commands::launch::run(cli.game_dir, args, forwarder),
        Commands::Extract(args) => commands::extract::run(cli.game_dir, &args),
        Commands::Resolve(args) => commands::resolve::run(cli.game_dir, &args),
        Commands::Cache(args) => commands::cache::run(cli.game_dir, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

/// Print an error and its cause chain to stderr
fn report(err: &PrelaunchError) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  Caused by: {cause}");
        source = cause.source();
    }
}
