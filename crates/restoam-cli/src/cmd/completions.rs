//! `rwo completions` — generate shell completion scripts.

use clap::Args;
use clap_complete::Shell;
use std::io;

#[derive(Args, Debug, PartialEq, Eq)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    pub shell: Shell,
}

pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    let bin_name = command.get_name().to_string();
    clap_complete::generate(shell, command, bin_name, &mut io::stdout());
    Ok(())
}
