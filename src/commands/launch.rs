//! Launch command implementation

use std::path::PathBuf;

use tracing::debug;

use prelaunch::bootstrap::{EntryRegistry, Prelaunch, discovery_from_env};
use prelaunch::error::Result;
use prelaunch::logging::LogForwarder;

use super::helpers::{host_resolver, load_layout};
use crate::cli::LaunchArgs;

/// Run the full bootstrap with the built-in entry points
pub fn run(game_dir: Option<PathBuf>, args: LaunchArgs, forwarder: LogForwarder) -> Result<()> {
    let (directories, config) = load_layout(game_dir)?;
    let host = host_resolver(&args.host)?;
    let discovery = discovery_from_env();
    debug!(locations = discovery.len(), "Read discovery locations");

    let registry = EntryRegistry::with_builtins();
    let mut prelaunch =
        Prelaunch::open(directories, &args.bundle, config)?.with_log_forwarder(forwarder);
    prelaunch.launch(&registry, host, &discovery, args.plugin.as_deref())?;
    Ok(())
}
