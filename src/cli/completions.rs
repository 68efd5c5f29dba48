use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    prelaunch completions bash > ~/.bash_completion.d/prelaunch\n\n\
                  Generate zsh completions:\n    prelaunch completions zsh > ~/.zfunc/_prelaunch\n\n\
                  Generate fish completions:\n    prelaunch completions fish > ~/.config/fish/completions/prelaunch.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
