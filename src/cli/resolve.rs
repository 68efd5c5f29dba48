use clap::Parser;
use std::path::PathBuf;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve an isolated symbol:\n    prelaunch resolve runtime.core.Engine --bundle host.tar\n\n\
                  Resolve through host locations:\n    prelaunch resolve app.Main --bundle host.tar --host libs/")]
pub struct ResolveArgs {
    /// Dotted symbol name
    pub symbol: String,

    /// Host bundle
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Location searched for symbols outside the isolated prefixes
    #[arg(long, value_name = "PATH")]
    pub host: Vec<PathBuf>,
}
