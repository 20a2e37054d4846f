//! Row derivation: search, sort and paging over the host's rows.
//!
//! [`derive_view`] is a pure function of the view state, the resolved config
//! and the row set. In server-side mode the host has already searched, sorted
//! and paged, so rows and total pass through untouched.

use unitable_query::{Query, Record, Value};

use crate::column::Column;
use crate::config::ResolvedConfig;
use crate::state::ViewState;

pub use unitable_query::total_pages;

/// The pipeline's input rows.
#[derive(Debug)]
pub struct RowSet<'a, R> {
    pub columns: &'a [Column],
    pub rows: &'a [R],
    /// Server-reported total; ignored client-side.
    pub total_records: Option<usize>,
}

// Manual impls: a derive would require `R: Clone`.
impl<R> Clone for RowSet<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RowSet<'_, R> {}

/// The visible window of rows.
#[derive(Debug)]
pub struct View<'a, R> {
    pub rows: Vec<&'a R>,
    /// Rows matching the search, before paging.
    pub total_count: usize,
}

/// A derived view as positions into the row set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window {
    pub indices: Vec<usize>,
    pub total_count: usize,
}

impl Window {
    /// Resolves the positions against `rows`.
    pub fn view<'a, R>(&self, rows: &'a [R]) -> View<'a, R> {
        View {
            rows: self.indices.iter().filter_map(|&i| rows.get(i)).collect(),
            total_count: self.total_count,
        }
    }
}

/// Derives the visible rows and the total row count.
pub fn derive_view<'a, R: Record>(
    state: &ViewState,
    config: &ResolvedConfig,
    source: RowSet<'a, R>,
) -> View<'a, R> {
    derive_window(state, config, source).view(source.rows)
}

/// Same as [`derive_view`], returning row positions.
pub fn derive_window<R: Record>(
    state: &ViewState,
    config: &ResolvedConfig,
    source: RowSet<'_, R>,
) -> Window {
    if config.server_side {
        return Window {
            indices: (0..source.rows.len()).collect(),
            total_count: source.total_records.unwrap_or(source.rows.len()),
        };
    }

    let indexed: Vec<Indexed<'_, R>> = source
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| Indexed { index, row })
        .collect();

    let query = build_query(state, config, source.columns);
    let result = query.run(&indexed);
    log::trace!(
        "derived {} of {} rows (page {})",
        result.items.len(),
        result.total,
        state.current_page
    );

    Window {
        indices: result.items.iter().map(|r| r.index).collect(),
        total_count: result.total,
    }
}

/// Translates view state into a query over the row set.
pub fn build_query(state: &ViewState, config: &ResolvedConfig, columns: &[Column]) -> Query {
    let mut query = Query::new();

    if config.searching && !state.search_term.is_empty() {
        let fields = columns
            .iter()
            .filter(|c| c.searchable)
            .map(|c| c.key.as_str());
        query = query.search(&state.search_term, fields);
    }

    if let Some(column) = &state.sort_column {
        query = query.order_by(column, state.sort_direction);
    }

    if config.paging {
        query = query.page(state.current_page, state.page_size);
    }

    query.build()
}

/// The page the grid should show given the current page count.
///
/// Pages only ever move down: past-the-end pages land on the last page, and
/// an empty result lands on page 1.
pub fn clamp_page(current: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        1
    } else {
        current.clamp(1, total_pages)
    }
}

struct Indexed<'a, R> {
    index: usize,
    row: &'a R,
}

impl<R: Record> Record for Indexed<'_, R> {
    fn field(&self, key: &str) -> Value<'_> {
        self.row.field(key)
    }

    fn values(&self) -> Vec<Value<'_>> {
        self.row.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::state::SortDirection;
    use serde_json::json;
    use unitable_query::JsonRow;

    fn rows() -> Vec<JsonRow> {
        let data = json!([
            {"name": "Tiger Nixon", "position": "System Architect", "salary": 320800},
            {"name": "Garrett Winters", "position": "Accountant", "salary": 170750},
            {"name": "Ashton Cox", "position": "Junior Technical Author", "salary": 86000},
            {"name": "Airi Satou", "position": "Accountant", "salary": 162700},
            {"name": "Brielle Williamson", "position": "Integration Specialist", "salary": 372000},
        ]);
        serde_json::from_value(data).unwrap()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("position", "Position"),
            Column::new("salary", "Salary").searchable(false),
        ]
    }

    fn state(config: &ResolvedConfig) -> ViewState {
        ViewState::seeded(config, &columns())
    }

    fn names(view: &View<'_, JsonRow>) -> Vec<String> {
        view.rows
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_over_searchable_columns() {
        let config = GridConfig::new().resolve();
        let mut state = state(&config);
        state.search_term = "ACCOUNT".into();
        let (rows, columns) = (rows(), columns());
        let source = RowSet {
            columns: &columns,
            rows: &rows,
            total_records: None,
        };

        let view = derive_view(&state, &config, source);
        assert_eq!(view.total_count, 2);
        assert_eq!(names(&view), vec!["Garrett Winters", "Airi Satou"]);

        state.search_term = "86000".into();
        assert_eq!(derive_view(&state, &config, source).total_count, 0);
    }

    #[test]
    fn searching_disabled_skips_filter() {
        let config = GridConfig::new().searching(false).resolve();
        let mut state = state(&config);
        state.search_term = "nobody".into();
        let (rows, columns) = (rows(), columns());
        let source = RowSet {
            columns: &columns,
            rows: &rows,
            total_records: None,
        };

        assert_eq!(derive_view(&state, &config, source).total_count, 5);
    }

    #[test]
    fn sort_then_page() {
        let config = GridConfig::new()
            .page_length(2)
            .default_sort("salary", SortDirection::Desc)
            .resolve();
        let mut state = state(&config);
        let (rows, columns) = (rows(), columns());
        let source = RowSet {
            columns: &columns,
            rows: &rows,
            total_records: None,
        };

        let first = derive_view(&state, &config, source);
        assert_eq!(first.total_count, 5);
        assert_eq!(names(&first), vec!["Brielle Williamson", "Tiger Nixon"]);

        state.current_page = 3;
        assert_eq!(names(&derive_view(&state, &config, source)), vec!["Ashton Cox"]);
    }

    #[test]
    fn paging_disabled_returns_everything() {
        let config = GridConfig::new().paging(false).page_length(2).resolve();
        let state = state(&config);
        let (rows, columns) = (rows(), columns());
        let source = RowSet {
            columns: &columns,
            rows: &rows,
            total_records: None,
        };

        assert_eq!(derive_view(&state, &config, source).rows.len(), 5);
    }

    #[test]
    fn server_side_passes_through() {
        let config = GridConfig::new().server_side(true).page_length(2).resolve();
        let mut state = state(&config);
        state.search_term = "nobody".into();
        state.sort_column = Some("salary".into());
        let (rows, columns) = (rows(), columns());
        let source = RowSet {
            columns: &columns,
            rows: &rows,
            total_records: Some(57),
        };

        let view = derive_view(&state, &config, source);
        assert_eq!(view.total_count, 57);
        assert_eq!(names(&view)[0], "Tiger Nixon");
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn clamp() {
        assert_eq!(clamp_page(3, 0), 1);
        assert_eq!(clamp_page(5, 2), 2);
        assert_eq!(clamp_page(2, 4), 2);
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(21, 10), 3);
    }
}
