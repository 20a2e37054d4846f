//! Query engine for the rows of a data grid.
//!
//! A grid row is an open mapping from column key to value. This crate turns
//! a slice of such rows into the window a grid displays:
//!
//! - Case-insensitive substring search across a set of columns (a row matches
//!   when *any* of them contains the term)
//! - Single-column ordering, ascending or descending, stable for equal keys
//! - Pagination with offset and limit, reporting the pre-paging total
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use unitable_query::{Dir, JsonRow, Query};
//!
//! let rows: Vec<JsonRow> = vec![
//!     json!({"name": "Garrett Winters", "position": "Accountant", "salary": 170750}),
//!     json!({"name": "Paul Byrd", "position": "CFO", "salary": 725000}),
//!     json!({"name": "Airi Satou", "position": "Accountant", "salary": 162700}),
//! ]
//! .into_iter()
//! .map(|v| v.as_object().cloned().unwrap())
//! .collect();
//!
//! let query = Query::new()
//!     .search("account", ["name", "position"])
//!     .order_by("salary", Dir::Desc)
//!     .build();
//!
//! let result = query.run(&rows);
//! assert_eq!(result.total, 2);
//! assert_eq!(result.items[0]["name"], "Garrett Winters");
//! ```
//!
//! # Ordering Semantics
//!
//! Cells are compared with a total relational order (see [`compare_values`]):
//! values of the same kind compare naturally (numbers numerically, strings
//! lexicographically), and values of different kinds are ranked
//! `missing < bool < number < string < composite`. Ordering by a column no
//! row has therefore leaves the input order untouched.

mod ordering;
mod paging;
mod query;
mod record;
mod search;
mod value;

pub use ordering::{compare_values, Dir, OrderBy};
pub use paging::total_pages;
pub use query::{Query, QueryResult};
pub use record::{JsonRow, Record};
pub use search::Search;
pub use value::{Number, Value};
