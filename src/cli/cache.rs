use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    prelaunch cache\n\n\
                  List extracted dependencies:\n    prelaunch cache list\n\n\
                  Remove every extracted dependency:\n    prelaunch cache clear\n\n\
                  Remove one extracted file:\n    prelaunch cache clear --only runtime.tar")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List extracted dependencies
    List,

    /// Remove extracted dependencies
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only this extracted file (e.g., runtime.tar)
    #[arg(long)]
    pub only: Option<String>,
}
