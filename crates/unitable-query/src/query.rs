//! Query builder and executor.
//!
//! A [`Query`] describes the three stages a grid applies to its rows, in
//! order: search, ordering, then the page window. [`Query::run`] reports
//! the matching total alongside the windowed rows so a caller can page
//! without running the search twice.

use crate::ordering::{Dir, OrderBy};
use crate::record::Record;
use crate::search::Search;

/// A query over a slice of rows.
///
/// # Example
///
/// ```
/// use unitable_query::{Dir, Query};
///
/// let query = Query::new()
///     .search("tokyo", ["office"])
///     .order_by("age", Dir::Desc)
///     .page(2, 10)
///     .build();
///
/// assert_eq!(query.get_offset(), Some(10));
/// assert_eq!(query.get_limit(), Some(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    search: Option<Search>,
    ordering: Option<OrderBy>,
    limit: Option<usize>,
    offset: Option<usize>,
}

/// Rows selected by a query, with the total before paging.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a, T> {
    /// The rows inside the page window, in order.
    pub items: Vec<&'a T>,
    /// How many rows matched before offset and limit were applied.
    pub total: usize,
}

impl<T> QueryResult<'_, T> {
    /// Clones the windowed rows out of the source slice.
    pub fn cloned(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().map(|row| (*row).clone()).collect()
    }
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query returns every row in input order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Searches `term` in the given columns (any column may match).
    pub fn search<I, S>(mut self, term: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search = Some(Search::new(term, fields));
        self
    }

    /// Searches `term` in every cell of each row.
    pub fn search_all(mut self, term: &str) -> Self {
        self.search = Some(Search::all_fields(term));
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Orders rows by a column. A later call replaces an earlier one.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.ordering = Some(OrderBy::new(field, dir));
        self
    }

    /// Orders rows ascending by a column.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Orders rows descending by a column.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the maximum number of results to return.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Windows the results to 1-based `page` of `size` rows.
    pub fn page(self, page: usize, size: usize) -> Self {
        self.offset(page.saturating_sub(1).saturating_mul(size))
            .limit(size)
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search, if set.
    pub fn get_search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Returns the ordering, if set.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.ordering.as_ref()
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single row passes the search.
    pub fn matches<T: Record>(&self, row: &T) -> bool {
        self.search
            .as_ref()
            .map_or(true, |search| search.matches(row))
    }

    /// Searches and orders rows, ignoring offset and limit.
    ///
    /// The sort is stable: rows that compare equal keep their input order.
    pub fn filter<'a, T: Record>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let mut results: Vec<&'a T> = match &self.search {
            Some(search) if !search.is_empty() => {
                rows.iter().filter(|row| search.matches(*row)).collect()
            }
            _ => rows.iter().collect(),
        };

        if let Some(ordering) = &self.ordering {
            results.sort_by(|a, b| ordering.compare(*a, *b));
        }

        results
    }

    /// Searches, orders, then applies offset and limit.
    pub fn run<'a, T: Record>(&self, rows: &'a [T]) -> QueryResult<'a, T> {
        let matched = self.filter(rows);
        let total = matched.len();

        let items = matched
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        QueryResult { items, total }
    }

    /// Counts the rows passing the search.
    pub fn count<T: Record>(&self, rows: &[T]) -> usize {
        rows.iter().filter(|row| self.matches(*row)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::JsonRow;
    use serde_json::json;

    fn sample() -> Vec<JsonRow> {
        [
            json!({"name": "Tiger Nixon", "office": "Edinburgh", "age": 61}),
            json!({"name": "Garrett Winters", "office": "Tokyo", "age": 63}),
            json!({"name": "Ashton Cox", "office": "San Francisco", "age": 66}),
            json!({"name": "Cedric Kelly", "office": "Edinburgh", "age": 22}),
            json!({"name": "Airi Satou", "office": "Tokyo", "age": 33}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
    }

    #[test]
    fn empty_query_returns_all_in_order() {
        let rows = sample();
        let result = Query::new().run(&rows);
        assert_eq!(result.total, 5);
        assert_eq!(result.items[0]["name"], "Tiger Nixon");
        assert_eq!(result.items[4]["name"], "Airi Satou");
    }

    #[test]
    fn search_then_count() {
        let rows = sample();
        let query = Query::new().search("tokyo", ["office"]).build();
        assert_eq!(query.count(&rows), 2);
        assert_eq!(query.run(&rows).total, 2);
    }

    #[test]
    fn ordering_desc() {
        let rows = sample();
        let result = Query::new().order_desc("age").run(&rows);
        let ages: Vec<_> = result.items.iter().map(|r| r["age"].clone()).collect();
        assert_eq!(ages, vec![json!(66), json!(63), json!(61), json!(33), json!(22)]);
    }

    #[test]
    fn ordering_is_stable_for_ties() {
        let rows = sample();
        let result = Query::new().order_asc("office").run(&rows);
        let names: Vec<_> = result.items.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(
            names,
            vec![
                json!("Tiger Nixon"),
                json!("Cedric Kelly"),
                json!("Ashton Cox"),
                json!("Garrett Winters"),
                json!("Airi Satou"),
            ]
        );
    }

    #[test]
    fn unknown_sort_column_keeps_order() {
        let rows = sample();
        let result = Query::new().order_desc("salary").run(&rows);
        assert_eq!(result.items[0]["name"], "Tiger Nixon");
        assert_eq!(result.items[4]["name"], "Airi Satou");
    }

    #[test]
    fn page_window_and_total() {
        let rows = sample();
        let result = Query::new().page(2, 2).run(&rows);
        assert_eq!(result.total, 5);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0]["name"], "Ashton Cox");

        let last = Query::new().page(3, 2).run(&rows);
        assert_eq!(last.items.len(), 1);

        let past = Query::new().page(9, 2).run(&rows);
        assert!(past.items.is_empty());
        assert_eq!(past.total, 5);
    }

    #[test]
    fn later_order_replaces_earlier() {
        let query = Query::new().order_asc("a").order_desc("b").build();
        assert_eq!(query.ordering(), Some(&OrderBy::desc("b")));
    }

    #[test]
    fn cloned_results() {
        let rows = sample();
        let owned: Vec<JsonRow> = Query::new().limit(1).run(&rows).cloned();
        assert_eq!(owned, vec![rows[0].clone()]);
    }
}
