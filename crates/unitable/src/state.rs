//! View state: the grid's user-facing state and the store that owns it.
//!
//! [`ViewState`] is the output contract handed to observers and row sources.
//! [`ViewStore`] holds it alongside the interaction-only fields (expanded
//! rows, drag source) and exposes one setter per field. Every setter reports
//! whether it changed anything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::config::ResolvedConfig;

pub use unitable_query::Dir as SortDirection;

/// Snapshot of the grid's view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub page_size: usize,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-based.
    pub current_page: usize,
    /// Columns the user has hidden.
    pub hidden_columns: BTreeSet<String>,
    /// Host-owned filter state, passed through untouched.
    pub external_filters: Option<serde_json::Value>,
}

impl ViewState {
    /// Initial state derived from config defaults and column visibility.
    pub fn seeded(config: &ResolvedConfig, columns: &[Column]) -> Self {
        let (sort_column, sort_direction) = match &config.default_sort {
            Some(sort) => (Some(sort.column.clone()), sort.direction),
            None => (None, SortDirection::Asc),
        };

        ViewState {
            search_term: String::new(),
            page_size: config.page_length,
            sort_column,
            sort_direction,
            current_page: 1,
            hidden_columns: initially_hidden(columns),
            external_filters: None,
        }
    }
}

/// Keys of columns declared with `visible: false`.
pub fn initially_hidden(columns: &[Column]) -> BTreeSet<String> {
    columns
        .iter()
        .filter(|c| !c.visible)
        .map(|c| c.key.clone())
        .collect()
}

/// Owner of the mutable view state.
#[derive(Debug, Clone)]
pub struct ViewStore {
    state: ViewState,
    expanded_rows: BTreeSet<usize>,
    drag_source: Option<usize>,
}

impl ViewStore {
    pub fn new(state: ViewState) -> Self {
        ViewStore {
            state,
            expanded_rows: BTreeSet::new(),
            drag_source: None,
        }
    }

    pub fn seeded(config: &ResolvedConfig, columns: &[Column]) -> Self {
        Self::new(ViewState::seeded(config, columns))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        let changed = self.state.search_term != term;
        self.state.search_term = term;
        changed
    }

    /// Sets the page size. Zero is not a page size and is ignored.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        let changed = self.state.page_size != size;
        self.state.page_size = size;
        changed
    }

    pub fn set_sort(&mut self, column: Option<String>, direction: SortDirection) -> bool {
        let changed =
            self.state.sort_column != column || self.state.sort_direction != direction;
        self.state.sort_column = column;
        self.state.sort_direction = direction;
        changed
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        let changed = self.state.sort_direction != direction;
        self.state.sort_direction = direction;
        changed
    }

    pub fn set_current_page(&mut self, page: usize) -> bool {
        let changed = self.state.current_page != page;
        self.state.current_page = page;
        changed
    }

    /// Replaces the user-hidden set wholesale.
    pub fn set_hidden_columns(&mut self, hidden: BTreeSet<String>) -> bool {
        let changed = self.state.hidden_columns != hidden;
        self.state.hidden_columns = hidden;
        changed
    }

    /// Flips one column in the user-hidden set.
    ///
    /// The set is rebuilt rather than edited in place, so any copy handed out
    /// earlier keeps its old contents.
    pub fn toggle_hidden(&mut self, key: &str) {
        let mut next = self.state.hidden_columns.clone();
        if !next.remove(key) {
            next.insert(key.to_string());
        }
        self.state.hidden_columns = next;
    }

    pub fn set_external_filters(&mut self, filters: Option<serde_json::Value>) -> bool {
        let changed = self.state.external_filters != filters;
        self.state.external_filters = filters;
        changed
    }

    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        let mut next = self.expanded_rows.clone();
        let expanded = next.insert(index);
        if !expanded {
            next.remove(&index);
        }
        self.expanded_rows = next;
        expanded
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded_rows.contains(&index)
    }

    pub fn set_drag_source(&mut self, index: Option<usize>) {
        self.drag_source = index;
    }

    pub fn drag_source(&self) -> Option<usize> {
        self.drag_source
    }

    /// Puts every field back to `state`, clearing interaction-only fields.
    pub fn reset_to(&mut self, state: ViewState) {
        self.state = state;
        self.expanded_rows = BTreeSet::new();
        self.drag_source = None;
    }
}
