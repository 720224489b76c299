//! Terminal user interface for the workorder client.
//!
//! Provides an interactive full-screen view for browsing, filtering, and
//! editing workorders.
//!
//! ## Entry points
//!
//! - [`run_ui`] — interactive workorder list with filtering, pagination, and
//!   add/edit/delete overlays.

pub mod form;
pub mod list;

use crate::tui::list::BrowseView;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use restoam_core::config::AppConfig;
use restoam_core::controller::{FILTER_KEY, ListController};
use restoam_core::store::FileStore;
use restoam_core::{FilterSet, HttpApi};
use std::time::{Duration, Instant};

/// Run the full-screen browse UI until the user quits.
pub fn run_ui(config: &AppConfig) -> Result<()> {
    let api = HttpApi::new(&config.workorder_api);
    let store = FileStore::new(&config.data_dir);
    let controller = ListController::new(api, store, FILTER_KEY, FilterSet::default());
    let mut view = BrowseView::new(controller);
    view.refresh();

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut view);
    ratatui::restore();
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    view: &mut BrowseView<HttpApi, FileStore>,
) -> Result<()> {
    while !view.should_quit() {
        terminal.draw(|frame| view.render(frame, frame.area()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    view.handle_key(key);
                }
            }
        }

        view.tick(Instant::now());
    }
    Ok(())
}
