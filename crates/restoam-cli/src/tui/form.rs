//! Add/edit form overlay.
//!
//! Field-by-field editing of one workorder record. In edit mode the record
//! is fetched when the overlay opens; a fetch failure shows a blocking error
//! but still presents the blank form rather than staying stuck loading.
//!
//! The form itself is a pure state machine over key events — the browse view
//! performs the actual create/update call when [`FormAction::Submit`] is
//! returned, and feeds failures back via [`WorkorderForm::set_error`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use restoam_core::{Priority, Status, Workorder, WorkorderApi};

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// The editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    AssetId,
    LocationId,
}

impl FormField {
    const ORDER: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::AssetId,
        Self::LocationId,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::AssetId => "Asset ID",
            Self::LocationId => "Location ID",
        }
    }
}

/// The action the form wants the caller to take.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Submit this record (already normalized).
    Submit(Workorder),
    /// The user cancelled; close the overlay.
    Cancel,
}

/// Overlay form for adding or editing a workorder.
pub struct WorkorderForm {
    mode: FormMode,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    asset_id: String,
    location_id: String,
    /// Server-assigned fields carried through on edit.
    id: Option<String>,
    created_date: Option<chrono::DateTime<chrono::Utc>>,
    focus: FormField,
    loading: bool,
    saving: bool,
    error: Option<String>,
}

impl WorkorderForm {
    /// Blank form with the documented defaults.
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            description: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            asset_id: String::new(),
            location_id: String::new(),
            id: None,
            created_date: None,
            focus: FormField::Title,
            loading: false,
            saving: false,
            error: None,
        }
    }

    /// Edit form for `id`; starts in the loading state until
    /// [`load`](Self::load) runs.
    #[must_use]
    pub fn edit(id: impl Into<String>) -> Self {
        let mut form = Self::add();
        form.mode = FormMode::Edit { id: id.into() };
        form.loading = true;
        form
    }

    /// Fetch the record under edit. On failure the blank form stays usable
    /// with a blocking error message; the loading flag clears either way.
    pub fn load<A: WorkorderApi>(&mut self, api: &A) {
        if let FormMode::Edit { id } = &self.mode {
            match api.get(id) {
                Ok(workorder) => self.populate(&workorder),
                Err(err) => {
                    tracing::error!("failed to fetch workorder {id}: {err}");
                    self.error = Some("failed to load workorder".to_string());
                }
            }
        }
        self.loading = false;
    }

    fn populate(&mut self, workorder: &Workorder) {
        self.title = workorder.title.clone();
        self.description = workorder.description.clone().unwrap_or_default();
        self.status = workorder.status;
        self.priority = workorder.priority;
        self.asset_id = workorder.asset_id.clone().unwrap_or_default();
        self.location_id = workorder.location_id.clone().unwrap_or_default();
        self.id = workorder.id.clone();
        self.created_date = workorder.created_date;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether the edit fetch is still pending (for external read-back).
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The blocking error message, if any (for external read-back).
    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// The record the form would submit.
    #[must_use]
    pub fn assemble(&self) -> Workorder {
        let mut workorder = Workorder {
            id: self.id.clone(),
            title: self.title.clone(),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            status: self.status,
            priority: self.priority,
            asset_id: Some(self.asset_id.clone()),
            location_id: Some(self.location_id.clone()),
            created_date: self.created_date,
        };
        workorder.normalize_refs();
        workorder
    }

    /// Feed a key event to the form. Returns the action to take, or `None`
    /// while editing continues.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        match key.code {
            KeyCode::Esc => Some(FormAction::Cancel),

            KeyCode::Enter => {
                // Saving flag disables duplicate submissions.
                if self.saving || self.loading {
                    return None;
                }
                if self.title.trim().is_empty() {
                    self.error = Some("title is required".to_string());
                    return None;
                }
                Some(FormAction::Submit(self.assemble()))
            }

            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }

            KeyCode::Left => {
                self.cycle_choice(false);
                None
            }
            KeyCode::Right => {
                self.cycle_choice(true);
                None
            }

            KeyCode::Backspace => {
                if let Some(buf) = self.focused_text_mut() {
                    buf.pop();
                }
                None
            }

            KeyCode::Char(c) => {
                match self.focused_text_mut() {
                    Some(buf) => buf.push(c),
                    // Space also cycles the enum fields.
                    None if c == ' ' => self.cycle_choice(true),
                    None => {}
                }
                None
            }

            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::AssetId => Some(&mut self.asset_id),
            FormField::LocationId => Some(&mut self.location_id),
            FormField::Status | FormField::Priority => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Status => {
                self.status = cycle(&Status::ALL, self.status, forward);
            }
            FormField::Priority => {
                self.priority = cycle(&Priority::ALL, self.priority, forward);
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Render the form as a centered overlay on top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_w: u16 = 64.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 12.min(area.height.saturating_sub(4));
        let x = area.x + area.width.saturating_sub(dialog_w) / 2;
        let y = area.y + area.height.saturating_sub(dialog_h) / 2;
        let dialog_area = Rect {
            x,
            y,
            width: dialog_w,
            height: dialog_h,
        };

        frame.render_widget(Clear, dialog_area);

        let title = match &self.mode {
            FormMode::Add => " Add Workorder ",
            FormMode::Edit { .. } => " Edit Workorder ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Black));
        frame.render_widget(block, dialog_area);

        let inner = Rect {
            x: dialog_area.x + 2,
            y: dialog_area.y + 1,
            width: dialog_area.width.saturating_sub(4),
            height: dialog_area.height.saturating_sub(2),
        };

        if self.loading {
            frame.render_widget(Paragraph::new("Loading workorder..."), inner);
            return;
        }

        let mut lines: Vec<Line> = FormField::ORDER
            .iter()
            .map(|field| self.field_line(*field))
            .collect();

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("error: {error}"),
                Style::default().fg(Color::Red),
            )));
        }

        let hint = if self.saving {
            "Saving..."
        } else {
            "Tab next · ←/→ change · Enter save · Esc cancel"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn field_line(&self, field: FormField) -> Line<'_> {
        let value = match field {
            FormField::Title => self.title.clone(),
            FormField::Description => self.description.clone(),
            FormField::Status => self.status.label().to_string(),
            FormField::Priority => self.priority.label().to_string(),
            FormField::AssetId => self.asset_id.clone(),
            FormField::LocationId => self.location_id.clone(),
        };
        let marker = if field == self.focus { "► " } else { "  " };
        let style = if field == self.focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{:<12} ", field.label()), style),
            Span::raw(value),
        ])
    }
}

/// Step through `values` from `current`, wrapping at either end.
fn cycle<T: Copy + PartialEq>(values: &[T], current: T, forward: bool) -> T {
    let len = values.len();
    let idx = values.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    values[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use restoam_core::error::ApiError;
    use restoam_core::{ListQuery, Page};

    struct FakeApi {
        record: Result<Workorder, ()>,
    }

    impl WorkorderApi for FakeApi {
        fn list(&self, _query: &ListQuery) -> Result<Page<Workorder>, ApiError> {
            unimplemented!("not used by form tests")
        }

        fn get(&self, _id: &str) -> Result<Workorder, ApiError> {
            self.record.clone().map_err(|()| ApiError::Decode {
                url: "http://fake/workorders/wo-1".into(),
                source: std::io::Error::other("fetch failed"),
            })
        }

        fn create(&self, _workorder: &Workorder) -> Result<Workorder, ApiError> {
            unimplemented!("not used by form tests")
        }

        fn update(&self, _id: &str, _workorder: &Workorder) -> Result<Workorder, ApiError> {
            unimplemented!("not used by form tests")
        }

        fn delete(&self, _id: &str) -> Result<(), ApiError> {
            unimplemented!("not used by form tests")
        }
    }

    fn type_str(form: &mut WorkorderForm, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn add_form_starts_with_documented_defaults() {
        let form = WorkorderForm::add();
        assert_eq!(form.status, Status::Open);
        assert_eq!(form.priority, Priority::Medium);
        assert!(form.title.is_empty());
        assert!(!form.is_loading());
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = WorkorderForm::add();
        type_str(&mut form, "Fix pump");
        assert_eq!(form.title, "Fix pump");

        form.handle_key(KeyEvent::from(KeyCode::Tab));
        type_str(&mut form, "It leaks");
        assert_eq!(form.description, "It leaks");
    }

    #[test]
    fn backspace_edits_the_focused_field() {
        let mut form = WorkorderForm::add();
        type_str(&mut form, "ab");
        form.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(form.title, "a");
    }

    #[test]
    fn tab_cycles_through_all_fields_and_wraps() {
        let mut form = WorkorderForm::add();
        for _ in 0..FormField::ORDER.len() {
            form.handle_key(KeyEvent::from(KeyCode::Tab));
        }
        assert_eq!(form.focus, FormField::Title);
        form.handle_key(KeyEvent::from(KeyCode::BackTab));
        assert_eq!(form.focus, FormField::LocationId);
    }

    #[test]
    fn arrows_cycle_enum_fields() {
        let mut form = WorkorderForm::add();
        form.focus = FormField::Status;
        form.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(form.status, Status::InProgress);
        form.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(form.status, Status::Open);

        form.focus = FormField::Priority;
        form.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert_eq!(form.priority, Priority::High);
    }

    #[test]
    fn esc_cancels() {
        let mut form = WorkorderForm::add();
        let action = form.handle_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(action, Some(FormAction::Cancel));
    }

    #[test]
    fn submit_requires_a_title() {
        let mut form = WorkorderForm::add();
        let action = form.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(action, None);
        assert_eq!(form.error(), Some("title is required"));
    }

    #[test]
    fn submit_normalizes_blank_references_to_null() {
        let mut form = WorkorderForm::add();
        type_str(&mut form, "New workorder");
        let action = form.handle_key(KeyEvent::from(KeyCode::Enter));
        let Some(FormAction::Submit(workorder)) = action else {
            panic!("expected Submit");
        };
        assert_eq!(workorder.title, "New workorder");
        assert!(workorder.asset_id.is_none());
        assert!(workorder.location_id.is_none());
        let json = serde_json::to_value(&workorder).expect("serialize");
        assert!(json["assetId"].is_null());
    }

    #[test]
    fn saving_flag_blocks_duplicate_submission() {
        let mut form = WorkorderForm::add();
        type_str(&mut form, "t");
        form.set_saving(true);
        assert_eq!(form.handle_key(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn edit_load_populates_fields() {
        let api = FakeApi {
            record: Ok(Workorder {
                id: Some("wo-1".into()),
                title: "Loaded".into(),
                status: Status::Done,
                priority: Priority::Critical,
                asset_id: Some("asset-1".into()),
                ..Workorder::default()
            }),
        };
        let mut form = WorkorderForm::edit("wo-1");
        assert!(form.is_loading());
        form.load(&api);
        assert!(!form.is_loading());
        assert_eq!(form.title, "Loaded");
        assert_eq!(form.status, Status::Done);
        assert_eq!(form.asset_id, "asset-1");
        assert!(form.error().is_none());
    }

    #[test]
    fn edit_load_failure_leaves_usable_blank_form() {
        let api = FakeApi { record: Err(()) };
        let mut form = WorkorderForm::edit("wo-1");
        form.load(&api);
        // Not stuck loading, blank record, blocking error shown.
        assert!(!form.is_loading());
        assert!(form.title.is_empty());
        assert_eq!(form.status, Status::Open);
        assert_eq!(form.error(), Some("failed to load workorder"));
        // The form still accepts input and submits.
        type_str(&mut form, "Recovered");
        let action = form.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(matches!(action, Some(FormAction::Submit(_))));
    }

    #[test]
    fn edit_submit_carries_id_and_created_date() {
        let created = chrono::Utc::now();
        let api = FakeApi {
            record: Ok(Workorder {
                id: Some("wo-1".into()),
                title: "Loaded".into(),
                created_date: Some(created),
                ..Workorder::default()
            }),
        };
        let mut form = WorkorderForm::edit("wo-1");
        form.load(&api);
        let workorder = form.assemble();
        assert_eq!(workorder.id.as_deref(), Some("wo-1"));
        assert_eq!(workorder.created_date, Some(created));
    }
}
