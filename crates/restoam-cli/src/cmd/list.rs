//! `rwo list` — the workorder list view: saved filters, pagination, and
//! empty-state messaging.

use crate::output::{self, OutputMode, TABLE_HEADERS, render};
use anyhow::Result;
use clap::Args;
use restoam_core::config::AppConfig;
use restoam_core::controller::{EmptyState, FILTER_KEY, ListController, PAGE_SIZES};
use restoam_core::store::{FileStore, FilterStore, MemoryStore};
use restoam_core::{FilterSet, HttpApi, Priority, Status, Workorder, WorkorderApi};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by title substring. Persisted for the next run.
    #[arg(short, long)]
    pub title: Option<String>,

    /// Filter by status: open, in-progress, done, cancelled, or "all".
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by priority: low, medium, high, critical, or "all".
    #[arg(short = 'P', long)]
    pub priority: Option<String>,

    /// Page index to show (zero-based, clamped to the available range).
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Page size.
    #[arg(short = 'n', long, value_parser = parse_size)]
    pub size: Option<usize>,

    /// Ignore the saved filters for this run (does not touch the slot).
    #[arg(long)]
    pub no_saved: bool,
}

fn parse_size(raw: &str) -> Result<usize, String> {
    let n: usize = raw.parse().map_err(|_| format!("invalid size '{raw}'"))?;
    if PAGE_SIZES.contains(&n) {
        Ok(n)
    } else {
        Err(format!("size must be one of {PAGE_SIZES:?}"))
    }
}

/// "all" clears the field; anything else must parse as the enum.
fn parse_status_filter(raw: &str) -> Result<Option<Status>> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Ok(Some(raw.parse::<Status>()?))
}

fn parse_priority_filter(raw: &str) -> Result<Option<Priority>> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Ok(Some(raw.parse::<Priority>()?))
}

#[derive(Debug, Serialize)]
struct ListOutput {
    content: Vec<Workorder>,
    page: usize,
    size: usize,
    #[serde(rename = "totalPages")]
    total_pages: usize,
}

pub fn run_list(args: &ListArgs, mode: OutputMode, config: &AppConfig) -> Result<()> {
    let api = HttpApi::new(&config.workorder_api);
    if args.no_saved {
        let store = MemoryStore::default();
        run_list_with(args, mode, api, store)
    } else {
        let store = FileStore::new(&config.data_dir);
        run_list_with(args, mode, api, store)
    }
}

fn run_list_with<A: WorkorderApi, S: FilterStore>(
    args: &ListArgs,
    mode: OutputMode,
    api: A,
    store: S,
) -> Result<()> {
    let mut controller = ListController::new(api, store, FILTER_KEY, FilterSet::default());

    controller.reload();

    if let Some(title) = &args.title {
        controller.set_title(title.clone());
    }
    if let Some(raw) = &args.status {
        controller.set_status(parse_status_filter(raw)?);
    }
    if let Some(raw) = &args.priority {
        controller.set_priority(parse_priority_filter(raw)?);
    }
    if let Some(size) = args.size {
        controller.set_size(size);
    }
    if let Some(page) = args.page {
        controller.set_page(page);
    }

    let payload = ListOutput {
        content: controller.rows().to_vec(),
        page: controller.page(),
        size: controller.size(),
        total_pages: controller.total_pages(),
    };
    let empty = controller.empty_state();

    render(mode, &payload, |list, w| {
        if let Some(state) = empty {
            return render_empty(state, w);
        }
        writeln!(w, "{}", TABLE_HEADERS.join("  "))?;
        for workorder in &list.content {
            output::table_row(workorder, w)?;
        }
        writeln!(
            w,
            "Page {} of {}  ·  {} per page",
            list.page + 1,
            list.total_pages.max(1),
            list.size
        )
    })
}

fn render_empty(state: EmptyState, w: &mut dyn Write) -> std::io::Result<()> {
    match state {
        EmptyState::NoMatches => {
            writeln!(w, "No workorders found.")?;
            writeln!(w, "No results match your current filters.")?;
            writeln!(w, "Clear them with: rwo filters --clear")
        }
        EmptyState::NoRecords => {
            writeln!(w, "No workorders yet.")?;
            writeln!(w, "Get started with: rwo create --title \"...\"")
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
        args: ListArgs,
    }

    #[test]
    fn list_args_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.title.is_none());
        assert!(w.args.status.is_none());
        assert!(w.args.priority.is_none());
        assert!(w.args.page.is_none());
        assert!(w.args.size.is_none());
        assert!(!w.args.no_saved);
    }

    #[test]
    fn size_flag_accepts_only_the_fixed_set() {
        let w = Wrapper::parse_from(["test", "--size", "20"]);
        assert_eq!(w.args.size, Some(20));
        assert!(Wrapper::try_parse_from(["test", "--size", "13"]).is_err());
    }

    #[test]
    fn status_filter_parses_all_and_values() {
        assert_eq!(parse_status_filter("all").expect("all"), None);
        assert_eq!(
            parse_status_filter("in-progress").expect("value"),
            Some(Status::InProgress)
        );
        assert!(parse_status_filter("bogus").is_err());
    }

    #[test]
    fn priority_filter_parses_all_and_values() {
        assert_eq!(parse_priority_filter("ALL").expect("all"), None);
        assert_eq!(
            parse_priority_filter("critical").expect("value"),
            Some(Priority::Critical)
        );
    }
}
