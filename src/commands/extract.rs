//! Extract command implementation

use std::path::PathBuf;

use prelaunch::bootstrap::Prelaunch;
use prelaunch::error::Result;

use super::helpers::{display_path, load_layout};
use crate::cli::ExtractArgs;

/// Extract one dependency and print where it lives
pub fn run(game_dir: Option<PathBuf>, args: &ExtractArgs) -> Result<()> {
    let (directories, config) = load_layout(game_dir)?;
    let prelaunch = Prelaunch::open(directories, &args.bundle, config)?;
    let path = prelaunch.extract_dependency(&args.name)?;
    println!("{}", display_path(&path).display());
    Ok(())
}
