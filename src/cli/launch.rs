use clap::Parser;
use std::path::PathBuf;

/// Arguments for the launch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Launch with the headless console plugin:\n    prelaunch launch --bundle host.tar --plugin prelaunch.launch.v1.ConsolePlugin\n\n\
                  Delegate non-isolated symbols to host locations:\n    prelaunch launch --bundle host.tar --host libs/ --host api.tar\n\n\
                  Add discovery locations:\n    MOD_CLASSES=mymod%%/dev/mymod prelaunch launch --bundle host.tar")]
pub struct LaunchArgs {
    /// Host bundle (tar or tar.gz with META-INF/MANIFEST.MF)
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Plugin symbol handed to the entry point (overrides the config file)
    #[arg(long, short = 'p')]
    pub plugin: Option<String>,

    /// Location searched for symbols outside the isolated prefixes
    #[arg(long, value_name = "PATH")]
    pub host: Vec<PathBuf>,
}
