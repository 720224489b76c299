//! TUI browse view for workorders.
//!
//! Full-screen list over the core [`ListController`]:
//! - filter popup (title/status/priority), persisted across sessions
//! - pagination and page-size keys
//! - delete with confirmation modal
//! - add/edit form overlays
//! - copy-id with a transient "Copied!" affordance
//! - key bindings: j/k navigate, n/p page, s size, f filter, c clear filters,
//!   a add, e edit, d delete, y copy id, r refresh, q quit

use crate::clipboard;
use crate::output;
use crate::tui::form::{FormAction, FormMode, WorkorderForm};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use restoam_core::controller::{EmptyState, ListController, PAGE_SIZES};
use restoam_core::store::FilterStore;
use restoam_core::{FilterSet, Priority, Status, WorkorderApi};
use std::time::{Duration, Instant};

/// How long the transient status affordance ("Copied!", "Deleted ...") stays
/// visible.
pub const STATUS_TTL: Duration = Duration::from_millis(2000);

/// Chip color for a status value.
const fn status_color(status: Status) -> Color {
    match status {
        Status::Open => Color::Blue,
        Status::InProgress => Color::Yellow,
        Status::Done => Color::Green,
        Status::Cancelled => Color::DarkGray,
    }
}

/// Chip color for a priority value.
const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Cyan,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::LightRed,
        Priority::Critical => Color::Red,
    }
}

/// Which overlay, if any, currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ViewMode {
    #[default]
    Normal,
    Filter,
    ConfirmDelete,
    Form,
}

/// Field focus inside the filter popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FilterField {
    #[default]
    Title,
    Status,
    Priority,
}

impl FilterField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Status => Self::Priority,
            Self::Priority => Self::Title,
        }
    }
}

/// Draft filter values edited in the popup; applied on Enter.
#[derive(Debug, Clone, Default)]
struct FilterDraft {
    title: String,
    status: Option<Status>,
    priority: Option<Priority>,
    field: FilterField,
}

impl FilterDraft {
    fn from_filters(filters: &FilterSet) -> Self {
        Self {
            title: filters.title.clone(),
            status: filters.status,
            priority: filters.priority,
            field: FilterField::Title,
        }
    }

    fn cycle_focused(&mut self, forward: bool) {
        match self.field {
            FilterField::Title => {}
            FilterField::Status => self.status = cycle_option(&Status::ALL, self.status, forward),
            FilterField::Priority => {
                self.priority = cycle_option(&Priority::ALL, self.priority, forward);
            }
        }
    }
}

/// Step an optional choice through `None` → values → `None`, wrapping.
fn cycle_option<T: Copy + PartialEq>(values: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = values.len();
    match current {
        None => {
            if forward {
                Some(values[0])
            } else {
                Some(values[len - 1])
            }
        }
        Some(v) => {
            let idx = values.iter().position(|x| *x == v).unwrap_or(0);
            if forward {
                if idx + 1 == len { None } else { Some(values[idx + 1]) }
            } else if idx == 0 {
                None
            } else {
                Some(values[idx - 1])
            }
        }
    }
}

/// The full-screen browse view.
pub struct BrowseView<A, S> {
    controller: ListController<A, S>,
    table_state: TableState,
    mode: ViewMode,
    filter_draft: FilterDraft,
    form: Option<WorkorderForm>,
    /// Identifier awaiting delete confirmation.
    pending_delete: Option<String>,
    status_msg: Option<(String, Instant)>,
    should_quit: bool,
}

impl<A: WorkorderApi, S: FilterStore> BrowseView<A, S> {
    pub fn new(controller: ListController<A, S>) -> Self {
        Self {
            controller,
            table_state: TableState::default(),
            mode: ViewMode::default(),
            filter_draft: FilterDraft::default(),
            form: None,
            pending_delete: None,
            status_msg: None,
            should_quit: false,
        }
    }

    /// The underlying state machine (for external read-back).
    #[cfg(test)]
    pub fn controller(&self) -> &ListController<A, S> {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Initial mount fetch.
    pub fn refresh(&mut self) {
        self.controller.reload();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let idx = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(idx));
        }
    }

    fn selected_id(&self) -> Option<String> {
        let idx = self.table_state.selected()?;
        self.controller.rows().get(idx)?.id.clone()
    }

    /// Show a transient status message starting at `now`.
    pub fn set_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.status_msg = Some((msg.into(), now));
    }

    /// The status message still visible at `now`, if any.
    pub fn active_status(&self, now: Instant) -> Option<&str> {
        self.status_msg
            .as_ref()
            .filter(|(_, at)| now.duration_since(*at) < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    /// Drop the status message once its 2000 ms window has passed.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .status_msg
            .as_ref()
            .is_some_and(|(_, at)| now.duration_since(*at) >= STATUS_TTL);
        if expired {
            self.status_msg = None;
        }
    }

    // -----------------------------------------------------------------------
    // Input handling
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            ViewMode::Normal => self.handle_key_normal(key),
            ViewMode::Filter => self.handle_key_filter(key),
            ViewMode::ConfirmDelete => self.handle_key_confirm(key),
            ViewMode::Form => self.handle_key_form(key),
        }
    }

    fn handle_key_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),

            KeyCode::Char('n') | KeyCode::Right => {
                self.controller.set_page(self.controller.page() + 1);
                self.clamp_selection();
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.controller
                    .set_page(self.controller.page().saturating_sub(1));
                self.clamp_selection();
            }
            KeyCode::Char('s') => {
                let next = next_page_size(self.controller.size());
                self.controller.set_size(next);
                self.clamp_selection();
            }

            KeyCode::Char('f') => {
                self.filter_draft = FilterDraft::from_filters(self.controller.filters());
                self.mode = ViewMode::Filter;
            }
            KeyCode::Char('c') => {
                self.controller.clear_filters();
                self.clamp_selection();
                self.set_status("Filters cleared", Instant::now());
            }

            KeyCode::Char('r') => {
                self.controller.reload();
                self.clamp_selection();
            }

            KeyCode::Char('a') => {
                self.form = Some(WorkorderForm::add());
                self.mode = ViewMode::Form;
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    let mut form = WorkorderForm::edit(id);
                    form.load(self.controller.api());
                    self.form = Some(form);
                    self.mode = ViewMode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.pending_delete = Some(id);
                    self.mode = ViewMode::ConfirmDelete;
                }
            }

            KeyCode::Char('y') => self.copy_selected_id(Instant::now()),

            _ => {}
        }
    }

    /// Copy the selected row's identifier; shows "Copied!" only on success.
    /// A row without an identifier copies nothing and shows nothing.
    pub fn copy_selected_id(&mut self, now: Instant) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if clipboard::copy(&id) {
            self.set_status("Copied!", now);
        }
    }

    fn handle_key_filter(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = ViewMode::Normal,
            KeyCode::Enter => self.apply_filter_draft(),
            KeyCode::Tab | KeyCode::Down => self.filter_draft.field = self.filter_draft.field.next(),
            KeyCode::Left => self.filter_draft.cycle_focused(false),
            KeyCode::Right => self.filter_draft.cycle_focused(true),
            KeyCode::Backspace => {
                if self.filter_draft.field == FilterField::Title {
                    self.filter_draft.title.pop();
                }
            }
            KeyCode::Char(c) => {
                if self.filter_draft.field == FilterField::Title {
                    self.filter_draft.title.push(c);
                } else if c == ' ' {
                    self.filter_draft.cycle_focused(true);
                }
            }
            _ => {}
        }
    }

    fn apply_filter_draft(&mut self) {
        let draft = self.filter_draft.clone();
        self.controller.set_title(draft.title);
        self.controller.set_status(draft.status);
        self.controller.set_priority(draft.priority);
        self.clamp_selection();
        self.mode = ViewMode::Normal;
    }

    fn handle_key_confirm(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(id) = self.pending_delete.take() {
                    match self.controller.delete(&id) {
                        Ok(()) => {
                            self.set_status(format!("Deleted {id}"), Instant::now());
                            self.clamp_selection();
                        }
                        Err(err) => {
                            tracing::error!("failed to delete workorder {id}: {err}");
                            self.set_status("Failed to delete workorder", Instant::now());
                        }
                    }
                }
                self.mode = ViewMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                // Declined: nothing is issued, nothing changes.
                self.pending_delete = None;
                self.mode = ViewMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_key_form(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.mode = ViewMode::Normal;
            return;
        };
        match form.handle_key(key) {
            Some(FormAction::Cancel) => {
                self.form = None;
                self.mode = ViewMode::Normal;
            }
            Some(FormAction::Submit(workorder)) => self.submit_form(&workorder),
            None => {}
        }
    }

    fn submit_form(&mut self, workorder: &restoam_core::Workorder) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        form.set_saving(true);
        let result = match form.mode() {
            FormMode::Add => self.controller.api().create(workorder).map(|_| ()),
            FormMode::Edit { id } => self.controller.api().update(id, workorder).map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.form = None;
                self.mode = ViewMode::Normal;
                self.set_status("Saved workorder", Instant::now());
                self.controller.reload();
                self.clamp_selection();
            }
            Err(err) => {
                tracing::error!("failed to save workorder: {err}");
                form.set_error("failed to save workorder");
                form.set_saving(false);
            }
        }
    }

    fn select_next(&mut self) {
        let len = self.controller.rows().len();
        if len == 0 {
            return;
        }
        let idx = self
            .table_state
            .selected()
            .map_or(0, |i| if i + 1 >= len { 0 } else { i + 1 });
        self.table_state.select(Some(idx));
    }

    fn select_prev(&mut self) {
        let len = self.controller.rows().len();
        if len == 0 {
            return;
        }
        let idx = self
            .table_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.table_state.select(Some(idx));
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        if self.controller.rows().is_empty() {
            self.render_empty(frame, chunks[1]);
        } else {
            self.render_table(frame, chunks[1]);
        }
        self.render_footer(frame, chunks[2]);

        match self.mode {
            ViewMode::Filter => self.render_filter_popup(frame, area),
            ViewMode::ConfirmDelete => self.render_confirm(frame, area),
            ViewMode::Form => {
                if let Some(form) = &self.form {
                    form.render(frame, area);
                }
            }
            ViewMode::Normal => {}
        }
    }

    fn filter_summary(&self) -> String {
        let filters = self.controller.filters();
        let mut parts = Vec::new();
        if !filters.title.is_empty() {
            parts.push(format!("title~'{}'", filters.title));
        }
        if let Some(status) = filters.status {
            parts.push(format!("status={}", status.label()));
        }
        if let Some(priority) = filters.priority {
            parts.push(format!("priority={}", priority.label()));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join("  ")
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " Workorders ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", self.filter_summary()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["Title", "Status", "Priority", "Asset", "Location", "Created"]
                .into_iter()
                .map(Cell::from),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .controller
            .rows()
            .iter()
            .map(|wo| {
                Row::new(vec![
                    Cell::from(output::truncate(&wo.title, 40)),
                    Cell::from(Span::styled(
                        wo.status.label(),
                        Style::default().fg(status_color(wo.status)),
                    )),
                    Cell::from(Span::styled(
                        wo.priority.label(),
                        Style::default().fg(priority_color(wo.priority)),
                    )),
                    Cell::from(wo.asset_id.clone().unwrap_or_else(|| "-".to_string())),
                    Cell::from(wo.location_id.clone().unwrap_or_else(|| "-".to_string())),
                    Cell::from(output::created_cell(wo)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(14),
                Constraint::Length(14),
                Constraint::Length(17),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let lines = match self.controller.empty_state() {
            Some(EmptyState::NoMatches) => vec![
                Line::from("No workorders found."),
                Line::from("No results match your current filters."),
                Line::from(Span::styled(
                    "press c to clear filters",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            Some(EmptyState::NoRecords) => vec![
                Line::from("No workorders yet."),
                Line::from("Get started by creating your first workorder."),
                Line::from(Span::styled(
                    "press a to add one",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let now = Instant::now();
        let left = if self.controller.is_loading() {
            "Loading workorders...".to_string()
        } else {
            format!(
                "Page {} of {}  ·  {} per page",
                self.controller.page() + 1,
                self.controller.total_pages().max(1),
                self.controller.size()
            )
        };
        let mut spans = vec![Span::raw(format!(" {left}  "))];
        if let Some(msg) = self.active_status(now) {
            spans.push(Span::styled(
                msg.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                "j/k move · n/p page · s size · f filter · a add · e edit · d delete · y copy id · q quit",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_filter_popup(&self, frame: &mut Frame, area: Rect) {
        let popup_w: u16 = 52.min(area.width.saturating_sub(4));
        let popup_h: u16 = 7.min(area.height.saturating_sub(4));
        let popup = centered(area, popup_w, popup_h);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Filter Workorders ")
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(block, popup);

        let inner = Rect {
            x: popup.x + 2,
            y: popup.y + 1,
            width: popup.width.saturating_sub(4),
            height: popup.height.saturating_sub(2),
        };

        let field_line = |field: FilterField, label: &str, value: String| {
            let marker = if self.filter_draft.field == field {
                "► "
            } else {
                "  "
            };
            let style = if self.filter_draft.field == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label:<10} "), style),
                Span::raw(value),
            ])
        };

        let lines = vec![
            field_line(
                FilterField::Title,
                "Title",
                format!("{}_", self.filter_draft.title),
            ),
            field_line(
                FilterField::Status,
                "Status",
                self.filter_draft
                    .status
                    .map_or("All".to_string(), |s| s.label().to_string()),
            ),
            field_line(
                FilterField::Priority,
                "Priority",
                self.filter_draft
                    .priority
                    .map_or("All".to_string(), |p| p.label().to_string()),
            ),
            Line::from(Span::styled(
                "Tab next · ←/→ change · Enter apply · Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let popup = centered(area, 44.min(area.width.saturating_sub(4)), 5);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Delete Workorder ")
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block, popup);

        let inner = Rect {
            x: popup.x + 2,
            y: popup.y + 1,
            width: popup.width.saturating_sub(4),
            height: popup.height.saturating_sub(2),
        };
        let id = self.pending_delete.as_deref().unwrap_or("?");
        let lines = vec![
            Line::from(format!("Delete workorder {id}?")),
            Line::from(Span::styled(
                "y confirm · n cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Next page size in the fixed cycle.
fn next_page_size(current: usize) -> usize {
    let idx = PAGE_SIZES.iter().position(|s| *s == current).unwrap_or(0);
    PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()]
}

/// Center a `w` x `h` rectangle inside `area`.
fn centered(area: Rect, w: u16, h: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h.min(area.height),
    }
}
