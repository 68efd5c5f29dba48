//! CLI definitions using clap derive API
//!
//! Argument types live in one submodule per command:
//! - launch: Launch command arguments
//! - extract: Extract command arguments
//! - resolve: Resolve command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod cache;
pub mod completions;
pub mod extract;
pub mod launch;
pub mod resolve;

pub use cache::{CacheArgs, CacheSubcommand};
pub use completions::CompletionsArgs;
pub use extract::ExtractArgs;
pub use launch::LaunchArgs;
pub use resolve::ResolveArgs;

/// Prelaunch - isolated runtime bootstrap
///
/// Extracts the dependencies embedded in a host bundle, builds an isolated
/// resolution hierarchy over them and hands off to the next-stage entry point.
#[derive(Parser, Debug)]
#[command(
    name = "prelaunch",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap an isolated runtime from a host bundle",
    long_about = "Prelaunch extracts the dependencies a host bundle declares in its manifest, \
                  constructs an isolated resolution hierarchy over the bundle and those \
                  dependencies, and invokes the versioned next-stage entry point.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  prelaunch launch --bundle host.tar         \x1b[90m# Full bootstrap\x1b[0m\n   \
                  prelaunch extract Runtime --bundle host.tar \x1b[90m# Extract one dependency\x1b[0m\n   \
                  prelaunch resolve runtime.core.Engine --bundle host.tar \x1b[90m# Locate a symbol\x1b[0m\n   \
                  prelaunch cache list                       \x1b[90m# List extracted dependencies\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Host game directory (defaults to current directory)
    #[arg(long, short = 'g', global = true, env = "PRELAUNCH_GAME_DIR")]
    pub game_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full bootstrap and invoke the entry point
    Launch(LaunchArgs),

    /// Extract one declared dependency and print its path
    Extract(ExtractArgs),

    /// Resolve a symbol through the isolated hierarchy
    Resolve(ResolveArgs),

    /// Inspect and clear extracted dependencies
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
