//! `rwo filters` — inspect or clear the persisted list filters.

use crate::output::{OutputMode, pretty_kv, pretty_rule, render, render_success};
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::controller::FILTER_KEY;
use restoam_core::store::{FileStore, FilterStore};
use restoam_core::FilterSet;
use std::io::Write;

#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Reset the saved filters to the defaults.
    #[arg(long)]
    pub clear: bool,
}

pub fn run_filters(args: &FiltersArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    let store = FileStore::new(&config.data_dir);
    let defaults = FilterSet::default();

    if args.clear {
        store.clear(FILTER_KEY, &defaults);
        return render_success(mode, "filters cleared");
    }

    let filters = store.load(FILTER_KEY, &defaults);
    let active = filters.has_active(&defaults);
    render(mode, &filters, |f, w| {
        writeln!(w, "Saved filters")?;
        pretty_rule(w)?;
        pretty_kv(w, "Title", if f.title.is_empty() { "-" } else { &f.title })?;
        pretty_kv(
            w,
            "Status",
            f.status.map_or("all", restoam_core::Status::label),
        )?;
        pretty_kv(
            w,
            "Priority",
            f.priority.map_or("all", restoam_core::Priority::label),
        )?;
        if !active {
            writeln!(w, "(no active filters)")?;
        }
        Ok(())
    })
}
