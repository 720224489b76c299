//! `rwo delete` — delete a workorder after interactive confirmation.

use crate::output::{OutputMode, render_error, render_success};
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::{HttpApi, WorkorderApi};
use std::io::{IsTerminal, Write};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Workorder identifier to delete.
    pub id: String,

    /// Skip the interactive confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

fn confirm_delete(id: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(true);
    }

    eprint!("Delete workorder {id}? [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn run_delete(args: &DeleteArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    if !args.force && !confirm_delete(&args.id)? {
        // Declined: no request is issued, nothing changes.
        render_success(mode, &format!("deletion of {} cancelled", args.id))?;
        return Ok(());
    }

    let api = HttpApi::new(&config.workorder_api);
    match api.delete(&args.id) {
        Ok(()) => render_success(mode, &format!("deleted workorder {}", args.id)),
        Err(err) => {
            tracing::error!("failed to delete workorder {}: {err}", args.id);
            render_error(mode, "failed to delete workorder")?;
            anyhow::bail!("failed to delete workorder '{}'", args.id);
        }
    }
}
