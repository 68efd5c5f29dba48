use std::path::{Path, PathBuf};

use prelaunch::cache;
use prelaunch::error::Result;

use super::helpers::load_layout;
use crate::cli::{CacheArgs, CacheSubcommand};

pub fn run(game_dir: Option<PathBuf>, args: CacheArgs) -> Result<()> {
    let (directories, _) = load_layout(game_dir)?;
    let deps_dir = directories.dependencies_dir();

    if let Some(command) = args.command {
        match command {
            CacheSubcommand::List => {
                list_extracted(&deps_dir)?;
                return Ok(());
            }
            CacheSubcommand::Clear(clear_args) => {
                if let Some(name) = clear_args.only {
                    clean_specific(&deps_dir, &name)?;
                } else {
                    clean_all(&deps_dir)?;
                }
                return Ok(());
            }
        }
    }

    // Default: show only cache statistics
    show_cache_stats(&deps_dir)?;

    Ok(())
}

fn print_stats_header(deps_dir: &Path) -> Result<cache::CacheStats> {
    let stats = cache::cache_stats(deps_dir)?;

    println!("Cache Statistics:");
    println!("  Location: {}", deps_dir.display());
    println!("  Dependencies: {}", stats.dependencies);
    println!("  Size: {}", stats.formatted_size());
    Ok(stats)
}

fn show_cache_stats(deps_dir: &Path) -> Result<()> {
    let stats = print_stats_header(deps_dir)?;

    if stats.dependencies == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'prelaunch cache list' to list extracted dependencies.");
        println!("Run 'prelaunch cache clear' to remove everything from cache.");
        println!("Run 'prelaunch cache clear --only <file>' to remove a single file.");
    }

    Ok(())
}

fn list_extracted(deps_dir: &Path) -> Result<()> {
    print_stats_header(deps_dir)?;
    println!();

    let dependencies = cache::list_extracted(deps_dir)?;

    if dependencies.is_empty() {
        println!("No extracted dependencies.");
        return Ok(());
    }

    println!("Extracted dependencies ({}):", dependencies.len());
    for dependency in &dependencies {
        println!("  {} ({})", dependency.name, dependency.formatted_size());
    }

    Ok(())
}

fn clean_all(deps_dir: &Path) -> Result<()> {
    cache::clear_cache(deps_dir)?;
    println!("Cache cleared successfully.");
    Ok(())
}

fn clean_specific(deps_dir: &Path, name: &str) -> Result<()> {
    cache::remove_extracted(deps_dir, name)?;
    println!("Removed extracted dependency: {name}");
    Ok(())
}
