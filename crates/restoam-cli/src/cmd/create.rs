//! `rwo create` — create a new workorder.

use crate::output::{OutputMode, render, render_error};
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::{HttpApi, Priority, Status, Workorder, WorkorderApi};
use std::io::Write;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title (required, non-empty).
    #[arg(long)]
    pub title: String,

    /// Free-text description.
    #[arg(long)]
    pub description: Option<String>,

    /// Initial status.
    #[arg(long, default_value = "open")]
    pub status: Status,

    /// Priority.
    #[arg(long, default_value = "medium")]
    pub priority: Priority,

    /// Linked asset identifier. Blank is sent as null.
    #[arg(long)]
    pub asset_id: Option<String>,

    /// Linked location identifier. Blank is sent as null.
    #[arg(long)]
    pub location_id: Option<String>,
}

impl CreateArgs {
    fn to_workorder(&self) -> Workorder {
        let mut workorder = Workorder {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            asset_id: self.asset_id.clone(),
            location_id: self.location_id.clone(),
            ..Workorder::default()
        };
        workorder.normalize_refs();
        workorder
    }
}

pub fn run_create(args: &CreateArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    if args.title.trim().is_empty() {
        render_error(mode, "title must not be empty")?;
        anyhow::bail!("title must not be empty");
    }

    let api = HttpApi::new(&config.workorder_api);
    let workorder = args.to_workorder();

    match api.create(&workorder) {
        Ok(created) => render(mode, &created, |wo, w| {
            writeln!(
                w,
                "✓ created workorder {} '{}'",
                wo.id.as_deref().unwrap_or("?"),
                wo.title
            )
        }),
        Err(err) => {
            tracing::error!("failed to create workorder: {err}");
            render_error(mode, "failed to create workorder")?;
            anyhow::bail!("failed to create workorder");
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
        args: CreateArgs,
    }

    #[test]
    fn create_args_apply_documented_defaults() {
        let w = Wrapper::parse_from(["test", "--title", "Fix pump"]);
        assert_eq!(w.args.status, Status::Open);
        assert_eq!(w.args.priority, Priority::Medium);
        assert!(w.args.asset_id.is_none());
    }

    #[test]
    fn title_is_required() {
        assert!(Wrapper::try_parse_from(["test"]).is_err());
    }

    #[test]
    fn blank_asset_reference_becomes_null() {
        let w = Wrapper::parse_from(["test", "--title", "t", "--asset-id", ""]);
        let workorder = w.args.to_workorder();
        assert!(workorder.asset_id.is_none());
        let json = serde_json::to_value(&workorder).expect("serialize");
        assert!(json["assetId"].is_null());
    }

    #[test]
    fn real_references_survive_normalization() {
        let w = Wrapper::parse_from(["test", "--title", "t", "--location-id", "loc-1"]);
        let workorder = w.args.to_workorder();
        assert_eq!(workorder.location_id.as_deref(), Some("loc-1"));
    }

    #[test]
    fn status_and_priority_flags_parse_enum_values() {
        let w = Wrapper::parse_from([
            "test",
            "--title",
            "t",
            "--status",
            "in-progress",
            "--priority",
            "critical",
        ]);
        assert_eq!(w.args.status, Status::InProgress);
        assert_eq!(w.args.priority, Priority::Critical);
    }
}
