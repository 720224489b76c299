//! `rwo show` — full details for one workorder, with collaborator links and
//! an optional copy of the identifier to the clipboard.

use crate::output::{self, OutputMode, pretty_kv, pretty_rule, render, render_error};
use crate::clipboard;
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::{HttpApi, Workorder, WorkorderApi, links};
use std::io::Write;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Workorder identifier.
    pub id: String,

    /// Also copy the identifier to the system clipboard.
    #[arg(long)]
    pub copy_id: bool,
}

pub fn run_show(args: &ShowArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    let api = HttpApi::new(&config.workorder_api);

    let workorder = match api.get(&args.id) {
        Ok(workorder) => workorder,
        Err(err) => {
            tracing::error!("failed to fetch workorder {}: {err}", args.id);
            render_error(mode, "failed to load workorder")?;
            anyhow::bail!("failed to load workorder '{}'", args.id);
        }
    };

    render(mode, &workorder, |wo, w| render_detail(wo, config, w))?;

    if args.copy_id {
        // Both copy paths failing is logged only; no confirmation is shown.
        if clipboard::copy(&args.id) && !mode.is_json() {
            println!("Copied!");
        }
    }

    Ok(())
}

fn render_detail(
    workorder: &Workorder,
    config: &AppConfig,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(w, "Workorder")?;
    pretty_rule(w)?;
    pretty_kv(w, "ID", workorder.id.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "Title", &workorder.title)?;
    pretty_kv(w, "Status", workorder.status.label())?;
    pretty_kv(w, "Priority", workorder.priority.label())?;
    pretty_kv(
        w,
        "Description",
        workorder.description.as_deref().unwrap_or("-"),
    )?;
    pretty_kv(w, "Created", output::created_cell(workorder))?;
    match &workorder.asset_id {
        Some(asset_id) => pretty_kv(
            w,
            "Asset",
            links::edit_url(&config.asset_app_url, asset_id),
        )?,
        None => pretty_kv(w, "Asset", "-")?,
    }
    match &workorder.location_id {
        Some(location_id) => pretty_kv(
            w,
            "Location",
            links::edit_url(&config.location_app_url, location_id),
        )?,
        None => pretty_kv(w, "Location", "-")?,
    }
    Ok(())
}
