//! The grid controller.
//!
//! [`Grid`] owns the config, the column sequence, the rows and the view
//! state, and exposes the interactions a table UI needs. Every interaction
//! follows the same cycle:
//!
//! 1. mutate the view state through the [`ViewStore`] setters,
//! 2. clamp the current page against the (re-derived) page count,
//! 3. report the state if it differs from what was last reported.
//!
//! Derived rows are computed lazily and cached on their inputs, so reading
//! [`Grid::rows`] twice without an interaction in between derives once.
//!
//! ```rust
//! use serde_json::json;
//! use unitable::{Column, Grid, GridConfig, JsonRow};
//!
//! let rows: Vec<JsonRow> = serde_json::from_value(json!([
//!     {"name": "Tiger Nixon", "office": "Edinburgh"},
//!     {"name": "Garrett Winters", "office": "Tokyo"},
//!     {"name": "Ashton Cox", "office": "San Francisco"},
//! ]))
//! .unwrap();
//!
//! let mut grid = Grid::builder()
//!     .config(GridConfig::new().page_length(2))
//!     .columns(vec![Column::new("name", "Name"), Column::new("office", "Office")])
//!     .rows(rows)
//!     .build();
//!
//! assert_eq!(grid.total_pages(), 2);
//! grid.sort_by("name");
//! assert_eq!(grid.rows()[0]["name"], "Ashton Cox");
//! grid.search("tokyo");
//! assert_eq!(grid.total_count(), 1);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use unitable_query::{JsonRow, Record};

use crate::column::{Column, DataConfig};
use crate::config::{GridConfig, ResolvedConfig};
use crate::error::{GridError, Result};
use crate::memo::Memo;
use crate::notifier::{GridEvents, Notifier, StateObserver};
use crate::persistence::Persistence;
use crate::pipeline::{self, RowSet, View, Window};
use crate::reorder;
use crate::resize::{ContainerSize, FrameScheduler, ResizeTracker, DEFAULT_COMPACT_BREAKPOINT};
use crate::responsive::{self, Measure, Reconciled};
use crate::source::RowPage;
use crate::state::{initially_hidden, SortDirection, ViewState, ViewStore};
use crate::store::StateStore;

/// Everything the row pipeline reads.
#[derive(Debug, Clone, PartialEq)]
struct PipelineKey {
    data_revision: u64,
    search_term: String,
    sort_column: Option<String>,
    sort_direction: SortDirection,
    current_page: usize,
    page_size: usize,
    searching: bool,
    paging: bool,
    server_side: bool,
}

impl PipelineKey {
    fn new(data_revision: u64, state: &ViewState, config: &ResolvedConfig) -> Self {
        PipelineKey {
            data_revision,
            search_term: state.search_term.clone(),
            sort_column: state.sort_column.clone(),
            sort_direction: state.sort_direction,
            current_page: state.current_page,
            page_size: state.page_size,
            searching: config.searching,
            paging: config.paging,
            server_side: config.server_side,
        }
    }
}

/// A headless data grid over rows of type `R`.
pub struct Grid<R = JsonRow> {
    config: GridConfig,
    resolved: ResolvedConfig,
    columns: Vec<Column>,
    rows: Vec<R>,
    total_records: Option<usize>,
    data_revision: u64,
    store: ViewStore,
    responsive_hidden: BTreeSet<String>,
    window: Memo<PipelineKey, Window>,
    notifier: Notifier,
    persistence: Persistence,
    events: Box<dyn GridEvents>,
    observer: Option<Box<dyn StateObserver>>,
    resize: ResizeTracker,
    frames: FrameScheduler,
}

impl<R> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.resolved)
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("state", self.store.state())
            .field("responsive_hidden", &self.responsive_hidden)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Grid`].
pub struct GridBuilder<R> {
    config: GridConfig,
    data: DataConfig<R>,
    persistence: Option<Persistence>,
    events: Option<Box<dyn GridEvents>>,
    observer: Option<Box<dyn StateObserver>>,
    compact_breakpoint: u32,
}

impl<R> Default for GridBuilder<R> {
    fn default() -> Self {
        GridBuilder {
            config: GridConfig::default(),
            data: DataConfig::default(),
            persistence: None,
            events: None,
            observer: None,
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
        }
    }
}

impl<R: Record> GridBuilder<R> {
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.data.columns = columns;
        self
    }

    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.data.rows = rows;
        self
    }

    /// Server-reported total for the supplied rows.
    pub fn total_records(mut self, total: usize) -> Self {
        self.data.total_records = Some(total);
        self
    }

    pub fn data(mut self, data: DataConfig<R>) -> Self {
        self.data = data;
        self
    }

    /// Store used for the persisted snapshot. Defaults to an in-memory store.
    pub fn store(mut self, store: impl StateStore + 'static) -> Self {
        self.persistence = Some(Persistence::new(store));
        self
    }

    pub fn events(mut self, events: impl GridEvents + 'static) -> Self {
        self.events = Some(Box::new(events));
        self
    }

    pub fn observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Width below which [`Grid::is_compact`] reports true.
    pub fn compact_breakpoint(mut self, width: u32) -> Self {
        self.compact_breakpoint = width;
        self
    }

    /// Builds the grid.
    ///
    /// Defaults are seeded from the resolved config, then overwritten by the
    /// persisted snapshot (if a storage key is set and a snapshot exists).
    /// The initial state is reported before this returns.
    pub fn build(self) -> Grid<R> {
        let resolved = self.config.resolve();
        let persistence = self.persistence.unwrap_or_default();
        let mut store = ViewStore::seeded(&resolved, &self.data.columns);
        let mut restored_filters = None;

        if let Some(key) = resolved.storage_key.as_deref() {
            if let Some(snapshot) = persistence.load(key) {
                log::debug!("restoring view state from '{}'", key);
                store = ViewStore::new(snapshot.restore_onto(store.state()));
                restored_filters = snapshot.restored_filters().cloned();
            }
        }

        let mut grid = Grid {
            config: self.config,
            resolved,
            columns: self.data.columns,
            rows: self.data.rows,
            total_records: self.data.total_records,
            data_revision: 0,
            store,
            responsive_hidden: BTreeSet::new(),
            window: Memo::new(),
            notifier: Notifier::new(),
            persistence,
            events: self
                .events
                .unwrap_or_else(|| Box::new(()) as Box<dyn GridEvents>),
            observer: self.observer,
            resize: ResizeTracker::with_breakpoint(self.compact_breakpoint),
            frames: FrameScheduler::new(),
        };

        if let Some(filters) = restored_filters {
            grid.events.state_restored(Some(&filters));
        }
        grid.settle();
        grid
    }
}

impl<R: Record> Grid<R> {
    pub fn builder() -> GridBuilder<R> {
        GridBuilder::default()
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn config(&self) -> &ResolvedConfig {
        &self.resolved
    }

    /// The config as supplied, before resolution.
    pub fn raw_config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Every row held by the grid, underived.
    pub fn all_rows(&self) -> &[R] {
        &self.rows
    }

    fn row_set(&self) -> RowSet<'_, R> {
        RowSet {
            columns: &self.columns,
            rows: &self.rows,
            total_records: self.total_records,
        }
    }

    fn window(&self) -> Rc<Window> {
        let state = self.store.state();
        let key = PipelineKey::new(self.data_revision, state, &self.resolved);
        self.window
            .get_or_compute(key, || pipeline::derive_window(state, &self.resolved, self.row_set()))
    }

    /// The rows on the current page.
    pub fn view(&self) -> View<'_, R> {
        self.window().view(&self.rows)
    }

    pub fn rows(&self) -> Vec<&R> {
        self.view().rows
    }

    /// Rows matching the search, across all pages.
    pub fn total_count(&self) -> usize {
        self.window().total_count
    }

    pub fn total_pages(&self) -> usize {
        pipeline::total_pages(self.total_count(), self.store.state().page_size)
    }

    /// `1..=total_pages`; empty when there are no rows.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    /// Number of times the row pipeline actually ran.
    pub fn derivations(&self) -> u64 {
        self.window.computations()
    }

    /// Columns to render: hidden neither by the user nor by the layout engine.
    pub fn visible_columns(&self) -> Vec<&Column> {
        responsive::visible_columns(
            &self.columns,
            &self.store.state().hidden_columns,
            &self.responsive_hidden,
        )
    }

    pub fn is_column_hidden(&self, key: &str) -> bool {
        self.store.state().hidden_columns.contains(key) || self.responsive_hidden.contains(key)
    }

    /// Columns collapsed by the layout engine, in sequence order.
    pub fn responsive_hidden_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| self.responsive_hidden.contains(&c.key))
            .collect()
    }

    pub fn is_row_expanded(&self, index: usize) -> bool {
        self.store.is_expanded(index)
    }

    pub fn drag_source(&self) -> Option<usize> {
        self.store.drag_source()
    }

    /// Returns `true` if the last reported container is narrower than the
    /// compact breakpoint.
    pub fn is_compact(&self) -> bool {
        self.resize.is_compact()
    }

    pub fn container_size(&self) -> Option<ContainerSize> {
        self.resize.current().map(|s| s.size)
    }

    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    // ========================================================================
    // Interactions
    // ========================================================================

    /// Sets the search term and goes back to page 1.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_search_term(term);
        self.store.set_current_page(1);
        self.settle();
    }

    /// Header click: sorts by `key`, flipping direction if it is already the
    /// sort column.
    ///
    /// Returns `false` (and changes nothing) for unknown or non-orderable
    /// columns.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let orderable = self
            .columns
            .iter()
            .any(|c| c.key == key && c.orderable);
        if !orderable {
            return false;
        }

        let state = self.store.state();
        if state.sort_column.as_deref() == Some(key) {
            let direction = state.sort_direction.toggled();
            self.store.set_sort_direction(direction);
        } else {
            self.store.set_sort(Some(key.to_string()), SortDirection::Asc);
        }
        self.settle();
        true
    }

    /// Sets the sort explicitly. `None` clears it.
    pub fn set_sort(&mut self, column: Option<&str>, direction: SortDirection) {
        self.store.set_sort(column.map(str::to_string), direction);
        self.settle();
    }

    /// Moves to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.store.set_current_page(page);
        self.settle();
        true
    }

    /// Sets the page size and goes back to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(GridError::InvalidPageSize);
        }
        self.store.set_page_size(size);
        self.store.set_current_page(1);
        self.settle();
        Ok(())
    }

    /// Shows or hides a column by user choice.
    pub fn toggle_column_visibility(&mut self, key: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c.key == key) {
            return Err(GridError::UnknownColumn(key.to_string()));
        }
        self.store.toggle_hidden(key);
        self.settle();
        Ok(())
    }

    /// Returns `true` if the row is now expanded.
    pub fn toggle_row_expansion(&mut self, index: usize) -> bool {
        self.store.toggle_expanded(index)
    }

    pub fn set_external_filters(&mut self, filters: Option<serde_json::Value>) {
        self.store.set_external_filters(filters);
        self.settle();
    }

    pub fn drag_start(&mut self, index: usize) {
        self.store.set_drag_source(Some(index));
    }

    /// Drops the dragged column at `index`.
    ///
    /// Returns `Ok(false)` if no drag is in progress or the column is dropped
    /// where it started. The drag ends either way.
    pub fn drop_at(&mut self, index: usize) -> Result<bool> {
        let Some(from) = self.store.drag_source() else {
            return Ok(false);
        };
        self.store.set_drag_source(None);
        if from == index {
            return Ok(false);
        }
        self.reorder_columns(from, index)?;
        Ok(true)
    }

    pub fn drag_end(&mut self) {
        self.store.set_drag_source(None);
    }

    /// Moves the column at `from` to `to`.
    ///
    /// Only display order changes; keys, visibility and priorities do not.
    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<()> {
        self.columns = reorder::reordered(&self.columns, from, to)?;
        Ok(())
    }

    // ========================================================================
    // Data and config
    // ========================================================================

    /// Re-resolves the config.
    ///
    /// Page size and sort follow the new defaults only where the resolved
    /// default itself changed. Leaving responsive mode brings back every
    /// column the layout engine had hidden.
    pub fn set_config(&mut self, config: GridConfig) {
        let resolved = config.resolve();
        log::debug!("re-resolving grid config");

        if resolved.page_length != self.resolved.page_length {
            self.store.set_page_size(resolved.page_length);
            self.store.set_current_page(1);
        }
        if resolved.searching != self.resolved.searching
            || resolved.server_side != self.resolved.server_side
        {
            self.store.set_current_page(1);
        }
        if resolved.default_sort != self.resolved.default_sort {
            let (column, direction) = match &resolved.default_sort {
                Some(sort) => (Some(sort.column.clone()), sort.direction),
                None => (None, SortDirection::Asc),
            };
            self.store.set_sort(column, direction);
        }

        let was_responsive = self.resolved.is_responsive();
        if !resolved.is_responsive() {
            self.responsive_hidden = BTreeSet::new();
        } else if !was_responsive {
            self.frames.notify();
        }

        self.config = config;
        self.resolved = resolved;
        self.settle();
    }

    /// Replaces the column sequence.
    ///
    /// User-hidden columns are re-seeded from the new columns' `visible`
    /// flags; layout-hidden keys that no longer exist are dropped.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.store.set_hidden_columns(initially_hidden(&columns));
        self.responsive_hidden = self
            .responsive_hidden
            .iter()
            .filter(|key| columns.iter().any(|c| &c.key == *key))
            .cloned()
            .collect();
        self.columns = columns;
        self.data_revision += 1;
        if self.resolved.is_responsive() {
            self.frames.notify();
        }
        self.settle();
    }

    /// Replaces the rows, keeping columns and hidden sets.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.data_revision += 1;
        self.settle();
    }

    pub fn set_total_records(&mut self, total: Option<usize>) {
        self.total_records = total;
        self.data_revision += 1;
        self.settle();
    }

    /// Replaces columns, rows and total at once.
    pub fn set_data(&mut self, data: DataConfig<R>) {
        self.rows = data.rows;
        self.total_records = data.total_records;
        self.set_columns(data.columns);
    }

    /// Installs a page delivered by a row source.
    pub fn apply_page(&mut self, page: RowPage<R>) {
        self.rows = page.rows;
        self.total_records = Some(page.total);
        self.data_revision += 1;
        self.settle();
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Writes the current state regardless of the auto-save setting.
    ///
    /// Does nothing without a storage key.
    pub fn manual_save(&mut self) -> Result<()> {
        match self.resolved.storage_key.as_deref() {
            Some(key) => self.persistence.save(key, self.store.state()),
            None => Ok(()),
        }
    }

    /// Drops the persisted snapshot and returns every field to its
    /// config-derived default. The host is told with a `None` restore.
    pub fn reset_view(&mut self) {
        if let Some(key) = self.resolved.storage_key.as_deref() {
            if let Err(e) = self.persistence.clear(key) {
                log::warn!("failed to clear snapshot '{}': {}", key, e);
            }
        }
        log::debug!("resetting view state");
        self.store
            .reset_to(ViewState::seeded(&self.resolved, &self.columns));
        self.events.state_restored(None);
        self.settle();
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Records a container size report.
    ///
    /// Returns `true` if this report scheduled a layout pass. Bursts of
    /// reports before the next frame share a single pass.
    pub fn resize(&mut self, size: ContainerSize) -> bool {
        if self.resize.observe(size).is_none() || !self.resolved.is_responsive() {
            return false;
        }
        self.frames.notify()
    }

    /// Runs the scheduled layout pass, if there is one.
    pub fn on_animation_frame<M: Measure + ?Sized>(&mut self, measure: &mut M) -> Option<Reconciled> {
        if !self.frames.take() {
            return None;
        }
        Some(self.recalculate_layout(measure))
    }

    /// Runs a layout pass now against the last reported container width.
    pub fn recalculate_layout<M: Measure + ?Sized>(&mut self, measure: &mut M) -> Reconciled {
        let Some(container) = self.resize.current() else {
            return Reconciled::Steady;
        };
        if !self.resolved.is_responsive() {
            return Reconciled::Steady;
        }

        let (hidden, outcome) = responsive::reconcile(
            container.size.width,
            &self.columns,
            &self.store.state().hidden_columns,
            &self.responsive_hidden,
            measure,
        );
        self.responsive_hidden = hidden;
        outcome
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Clamps the page, then reports the state if it changed.
    fn settle(&mut self) {
        let current = self.store.state().current_page;
        let clamped = pipeline::clamp_page(current, self.total_pages());
        if clamped != current {
            self.store.set_current_page(clamped);
        }
        self.notify();
    }

    fn notify(&mut self) {
        let state = self.store.state();
        if !self.notifier.observe(state) {
            return;
        }

        if self.resolved.server_side {
            self.events.state_change(state);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.on_state_change(state);
        }
        if self.resolved.persists_automatically() {
            if let Some(key) = self.resolved.storage_key.as_deref() {
                if let Err(e) = self.persistence.save(key, state) {
                    log::warn!("failed to save snapshot '{}': {}", key, e);
                }
            }
        }
    }
}
