//! Resolve command implementation

use std::path::PathBuf;

use console::style;

use prelaunch::bootstrap::Prelaunch;
use prelaunch::error::Result;
use prelaunch::resolver::Resolver;

use super::helpers::{host_resolver, load_layout};
use crate::cli::ResolveArgs;

/// Construct the hierarchy and report where a symbol comes from
pub fn run(game_dir: Option<PathBuf>, args: &ResolveArgs) -> Result<()> {
    let (directories, config) = load_layout(game_dir)?;
    let host = host_resolver(&args.host)?;

    let mut prelaunch = Prelaunch::open(directories, &args.bundle, config)?;
    prelaunch.extract_dependencies()?;
    let environment = prelaunch.construct_hierarchy(host)?;

    let symbol = environment.resolve(&args.symbol)?;
    let scope = if environment.hierarchy().cached(&args.symbol).is_some() {
        "isolated"
    } else {
        "host"
    };
    println!("{}", symbol.name());
    println!("  {} {}", style("Scope:").bold(), scope);
    println!("  {} {}", style("Origin:").bold(), symbol.origin());
    println!("  {} {}", style("Entry:").bold(), symbol.entry());
    Ok(())
}
