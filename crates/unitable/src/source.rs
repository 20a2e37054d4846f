//! Server-side row sources.
//!
//! In server-side mode the grid does not search, sort or page by itself. The
//! host asks a [`RowSource`] for the page matching the current view state and
//! hands the answer back with [`Grid::apply_page`]. [`refresh`] does both.
//!
//! Responses are applied in the order they are handed in. There is no request
//! token: a slow response applied after a newer one overwrites it.

use async_trait::async_trait;
use unitable_query::{Query, Record};

use crate::error::Result;
use crate::grid::Grid;
use crate::state::ViewState;

/// One page of rows plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage<R> {
    pub rows: Vec<R>,
    pub total: usize,
}

impl<R> RowPage<R> {
    pub fn new(rows: Vec<R>, total: usize) -> Self {
        RowPage { rows, total }
    }
}

/// Produces pages of rows for a view state.
#[async_trait(?Send)]
pub trait RowSource<R> {
    async fn fetch(&self, state: &ViewState) -> Result<RowPage<R>>;
}

/// Serves pages from rows held in memory.
///
/// Search looks at every field of a row, not only the grid's searchable
/// columns. The reported total counts matches before paging.
#[derive(Debug, Clone)]
pub struct MemoryRowSource<R> {
    rows: Vec<R>,
}

impl<R: Record + Clone> MemoryRowSource<R> {
    pub fn new(rows: Vec<R>) -> Self {
        MemoryRowSource { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Answers a request synchronously.
    pub fn page_for(&self, state: &ViewState) -> RowPage<R> {
        let mut query = Query::new();
        if !state.search_term.is_empty() {
            query = query.search_all(&state.search_term);
        }
        if let Some(column) = &state.sort_column {
            query = query.order_by(column, state.sort_direction);
        }
        let result = query.page(state.current_page, state.page_size).run(&self.rows);

        RowPage {
            rows: result.cloned(),
            total: result.total,
        }
    }
}

#[async_trait(?Send)]
impl<R: Record + Clone> RowSource<R> for MemoryRowSource<R> {
    async fn fetch(&self, state: &ViewState) -> Result<RowPage<R>> {
        Ok(self.page_for(state))
    }
}

/// Fetches the page for the grid's current state and applies it.
///
/// On failure the grid keeps its current rows and the error is returned.
pub async fn refresh<R, S>(grid: &mut Grid<R>, source: &S) -> Result<()>
where
    R: Record,
    S: RowSource<R> + ?Sized,
{
    let state = grid.state().clone();
    match source.fetch(&state).await {
        Ok(page) => {
            grid.apply_page(page);
            Ok(())
        }
        Err(e) => {
            log::warn!("row source failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::error::GridError;
    use crate::state::SortDirection;
    use futures::executor::block_on;
    use serde_json::json;
    use unitable_query::JsonRow;

    fn rows() -> Vec<JsonRow> {
        serde_json::from_value(json!([
            {"name": "Cedric Kelly", "office": "Edinburgh", "salary": 433060},
            {"name": "Jena Gaines", "office": "London", "salary": 90560},
            {"name": "Haley Kennedy", "office": "London", "salary": 313500},
            {"name": "Dai Rios", "office": "Edinburgh", "salary": 217500},
        ]))
        .unwrap()
    }

    fn state() -> ViewState {
        ViewState::seeded(&GridConfig::new().page_length(1).resolve(), &[])
    }

    #[test]
    fn searches_every_field_then_pages() {
        let source = MemoryRowSource::new(rows());
        let mut state = state();
        state.search_term = "london".into();
        state.sort_column = Some("salary".into());
        state.sort_direction = SortDirection::Desc;

        let page = block_on(source.fetch(&state)).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0]["name"], "Haley Kennedy");

        state.current_page = 2;
        let page = source.page_for(&state);
        assert_eq!(page.rows[0]["name"], "Jena Gaines");
    }

    struct Failing;

    #[async_trait(?Send)]
    impl RowSource<JsonRow> for Failing {
        async fn fetch(&self, _state: &ViewState) -> Result<RowPage<JsonRow>> {
            Err(GridError::row_source("offline"))
        }
    }

    #[test]
    fn failed_refresh_keeps_rows() {
        let mut grid = Grid::builder()
            .config(GridConfig::new().server_side(true))
            .rows(rows())
            .build();

        let err = block_on(refresh(&mut grid, &Failing)).unwrap_err();
        assert!(matches!(err, GridError::Source(_)));
        assert_eq!(grid.rows().len(), 4);
    }
}
