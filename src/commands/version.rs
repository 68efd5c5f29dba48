//! Version command implementation

use prelaunch::bootstrap::LAUNCH_TARGET;
use prelaunch::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("prelaunch {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!("  Entry point: {LAUNCH_TARGET}");

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
