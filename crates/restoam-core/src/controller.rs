//! The list view's filter/pagination state machine.
//!
//! Owns {page, size, filters, total pages, rows, loading} for the lifetime of
//! a list view and re-issues the collection fetch whenever one of those
//! changes by value. Deliberately has no UI: the CLI table and the TUI browse
//! view both drive this type, and tests drive it with an in-memory API fake.
//!
//! Fetch failures keep the previous rows (loading flag cleared, no retry).
//! Overlapping fetches cannot happen here — every transition completes its
//! reload before returning — so the upstream last-arrived-wins hazard does
//! not apply.

use crate::client::{ListQuery, Page, WorkorderApi};
use crate::error::ApiError;
use crate::filters::FilterSet;
use crate::model::{Priority, Status, Workorder};
use crate::store::FilterStore;

/// Page sizes offered by the size selector.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Page size before the user picks one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter scope key for the workorder list.
pub const FILTER_KEY: &str = "workorder-filters";

/// Why the list is empty — picks one of two mutually exclusive messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Filters are active and matched nothing; offer to clear them.
    NoMatches,
    /// The collection itself is empty; offer to create the first record.
    NoRecords,
}

/// List state machine over a [`WorkorderApi`] and a [`FilterStore`].
pub struct ListController<A, S> {
    api: A,
    store: S,
    filter_key: String,
    defaults: FilterSet,
    filters: FilterSet,
    page: usize,
    size: usize,
    total_pages: usize,
    rows: Vec<Workorder>,
    loading: bool,
}

impl<A: WorkorderApi, S: FilterStore> ListController<A, S> {
    /// Build the initial state: page 0, default size, filters read once from
    /// the store. The caller issues the first [`reload`](Self::reload).
    pub fn new(api: A, store: S, filter_key: impl Into<String>, defaults: FilterSet) -> Self {
        let filter_key = filter_key.into();
        let filters = store.load(&filter_key, &defaults);
        Self {
            api,
            store,
            filter_key,
            defaults,
            filters,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            rows: Vec::new(),
            loading: false,
        }
    }

    pub fn rows(&self) -> &[Workorder] {
        &self.rows
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// The request this state projects to.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
            filters: self.filters.clone(),
        }
    }

    /// Fetch the current page. On success rows and total pages are replaced;
    /// on failure the error is logged and the previous rows are kept.
    pub fn reload(&mut self) {
        self.loading = true;
        match self.api.list(&self.query()) {
            Ok(Page {
                content,
                total_pages,
            }) => {
                self.rows = content;
                self.total_pages = total_pages;
            }
            Err(err) => {
                tracing::error!("failed to fetch workorders: {err}");
            }
        }
        self.loading = false;
    }

    /// Update the title filter; persists, resets to page 0, refetches.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.filters.title == title {
            return;
        }
        self.filters.title = title;
        self.filters_changed();
    }

    /// Update the status filter (`None` = all); persists, resets to page 0,
    /// refetches.
    pub fn set_status(&mut self, status: Option<Status>) {
        if self.filters.status == status {
            return;
        }
        self.filters.status = status;
        self.filters_changed();
    }

    /// Update the priority filter (`None` = all); persists, resets to page 0,
    /// refetches.
    pub fn set_priority(&mut self, priority: Option<Priority>) {
        if self.filters.priority == priority {
            return;
        }
        self.filters.priority = priority;
        self.filters_changed();
    }

    /// Reset all filters to the defaults, persist, and refetch from page 0.
    pub fn clear_filters(&mut self) {
        self.filters = self.store.clear(&self.filter_key, &self.defaults);
        self.page = 0;
        self.reload();
    }

    fn filters_changed(&mut self) {
        self.store.save(&self.filter_key, &self.filters);
        self.page = 0;
        self.reload();
    }

    /// Move to page `n`, clamped to the server-reported range. A no-op when
    /// the clamped target equals the current page.
    pub fn set_page(&mut self, n: usize) {
        let last = self.total_pages.saturating_sub(1);
        let clamped = n.min(last);
        if clamped == self.page {
            return;
        }
        self.page = clamped;
        self.reload();
    }

    /// Change the page size. Values outside [`PAGE_SIZES`] are rejected with
    /// a warning; a valid change resets to page 0 and refetches.
    pub fn set_size(&mut self, n: usize) {
        if !PAGE_SIZES.contains(&n) {
            tracing::warn!("ignoring unsupported page size {n}");
            return;
        }
        if n == self.size {
            return;
        }
        self.size = n;
        self.page = 0;
        self.reload();
    }

    /// Delete a workorder the caller has already confirmed interactively,
    /// then refetch the current page. The deleted row shifting page contents
    /// is accepted — there is no rebalancing. On failure state is unchanged
    /// and the error is returned for the caller's blocking notification.
    pub fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id)?;
        self.reload();
        Ok(())
    }

    /// Classify an empty result set, or `None` when rows exist.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.rows.is_empty() {
            return None;
        }
        if self.filters.has_active(&self.defaults) {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoRecords)
        }
    }
}
