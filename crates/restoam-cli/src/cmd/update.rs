//! `rwo update` — edit an existing workorder.
//!
//! Fetches the current record, applies the provided flags over it, and PUTs
//! the result back. Passing an empty string to `--asset-id`/`--location-id`
//! clears the reference (sent as null).

use crate::output::{OutputMode, render, render_error};
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::{HttpApi, Priority, Status, Workorder, WorkorderApi};
use std::io::Write;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Workorder identifier.
    pub id: String,

    /// New title (non-empty).
    #[arg(long)]
    pub title: Option<String>,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,

    /// New status.
    #[arg(long)]
    pub status: Option<Status>,

    /// New priority.
    #[arg(long)]
    pub priority: Option<Priority>,

    /// New asset identifier; pass "" to clear.
    #[arg(long)]
    pub asset_id: Option<String>,

    /// New location identifier; pass "" to clear.
    #[arg(long)]
    pub location_id: Option<String>,
}

impl UpdateArgs {
    fn apply_to(&self, workorder: &mut Workorder) {
        if let Some(title) = &self.title {
            workorder.title = title.clone();
        }
        if let Some(description) = &self.description {
            workorder.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            workorder.status = status;
        }
        if let Some(priority) = self.priority {
            workorder.priority = priority;
        }
        if let Some(asset_id) = &self.asset_id {
            workorder.asset_id = Some(asset_id.clone());
        }
        if let Some(location_id) = &self.location_id {
            workorder.location_id = Some(location_id.clone());
        }
        workorder.normalize_refs();
    }
}

pub fn run_update(args: &UpdateArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    if args.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        render_error(mode, "title must not be empty")?;
        anyhow::bail!("title must not be empty");
    }

    let api = HttpApi::new(&config.workorder_api);

    let mut workorder = match api.get(&args.id) {
        Ok(workorder) => workorder,
        Err(err) => {
            tracing::error!("failed to fetch workorder {}: {err}", args.id);
            render_error(mode, "failed to load workorder")?;
            anyhow::bail!("failed to load workorder '{}'", args.id);
        }
    };

    args.apply_to(&mut workorder);

    match api.update(&args.id, &workorder) {
        Ok(updated) => render(mode, &updated, |wo, w| {
            writeln!(
                w,
                "✓ updated workorder {} '{}'",
                wo.id.as_deref().unwrap_or(&args.id),
                wo.title
            )
        }),
        Err(err) => {
            tracing::error!("failed to update workorder {}: {err}", args.id);
            render_error(mode, "failed to update workorder")?;
            anyhow::bail!("failed to update workorder '{}'", args.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: UpdateArgs,
    }

    #[test]
    fn update_args_parse() {
        let w = Wrapper::parse_from(["test", "wo-1", "--status", "done"]);
        assert_eq!(w.args.id, "wo-1");
        assert_eq!(w.args.status, Some(Status::Done));
        assert!(w.args.title.is_none());
    }

    #[test]
    fn apply_overrides_only_provided_fields() {
        let w = Wrapper::parse_from(["test", "wo-1", "--priority", "high"]);
        let mut workorder = Workorder {
            id: Some("wo-1".into()),
            title: "Original".into(),
            priority: Priority::Low,
            ..Workorder::default()
        };
        w.args.apply_to(&mut workorder);
        assert_eq!(workorder.title, "Original");
        assert_eq!(workorder.priority, Priority::High);
    }

    #[test]
    fn empty_reference_flag_clears_to_null() {
        let w = Wrapper::parse_from(["test", "wo-1", "--asset-id", ""]);
        let mut workorder = Workorder {
            asset_id: Some("asset-1".into()),
            ..Workorder::default()
        };
        w.args.apply_to(&mut workorder);
        assert!(workorder.asset_id.is_none());
    }
}
