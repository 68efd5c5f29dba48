use clap::Parser;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Extract the runtime dependency:\n    prelaunch extract Runtime --bundle host.tar")]
pub struct ExtractArgs {
    /// Logical dependency name declared in the bundle manifest
    pub name: String,

    /// Host bundle
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,
}
