//! # Unitable - Headless Data Grid Core
//!
//! `unitable` holds the state and logic of an interactive data table without
//! drawing anything: search, sort and paging over host rows, user column
//! visibility and drag reordering, priority-driven column hiding when the
//! container gets too narrow, and saving/restoring the view across sessions.
//!
//! The host renders. It feeds the grid rows, interactions and container
//! sizes, and reads back the rows and columns to draw.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use unitable::{Column, Grid, GridConfig, JsonRow, MemoryStore, SortDirection};
//!
//! let rows: Vec<JsonRow> = serde_json::from_value(json!([
//!     {"name": "Tiger Nixon", "position": "System Architect", "salary": 320800},
//!     {"name": "Garrett Winters", "position": "Accountant", "salary": 170750},
//!     {"name": "Airi Satou", "position": "Accountant", "salary": 162700},
//! ]))
//! .unwrap();
//!
//! let store = MemoryStore::new();
//! let mut grid = Grid::builder()
//!     .config(GridConfig::new().page_length(5).storage_key("employees"))
//!     .columns(vec![
//!         Column::new("name", "Name").priority(10),
//!         Column::new("position", "Position"),
//!         Column::new("salary", "Salary").searchable(false),
//!     ])
//!     .rows(rows)
//!     .store(store.clone())
//!     .build();
//!
//! grid.search("ACCOUNT");
//! grid.set_sort(Some("salary"), SortDirection::Desc);
//! assert_eq!(grid.total_count(), 2);
//! assert_eq!(grid.rows()[0]["name"], "Garrett Winters");
//! assert!(store.contains("employees"));
//! ```
//!
//! ## Modes
//!
//! - Client-side (default): the grid searches, sorts and pages the rows it
//!   holds.
//! - Server-side (`serverSide: true`): rows are already a page. The grid
//!   reports state changes through [`GridEvents`], a [`RowSource`] answers,
//!   and [`Grid::apply_page`] (or [`refresh`]) installs the result.
//!
//! ## Responsive Columns
//!
//! With `overflow: responsive`, report container sizes with [`Grid::resize`]
//! and run [`Grid::on_animation_frame`] once per frame with a [`Measure`].
//! Low-priority columns are hidden under pressure and high-priority ones come
//! back first when there is room.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger.

mod column;
mod config;
mod error;
mod grid;
mod memo;
mod notifier;
mod persistence;
mod pipeline;
mod registry;
mod reorder;
mod resize;
mod responsive;
mod source;
mod state;
mod store;

// Re-export public API
pub use column::{Column, DataConfig};
pub use config::{
    GridConfig, OverflowMode, PagingControlKind, PagingControls, PagingControlsConfig,
    ResolvedConfig, SortState, DEFAULT_PAGE_LENGTH, DEFAULT_PAGE_LENGTH_OPTIONS,
};
pub use error::{GridError, Result};
pub use grid::{Grid, GridBuilder};
pub use memo::Memo;
pub use notifier::{EventLog, GridEvent, GridEvents, Notifier, StateObserver};
pub use persistence::{PersistedSnapshot, PersistedSort, Persistence};
pub use pipeline::{build_query, clamp_page, derive_view, derive_window, total_pages, RowSet, View, Window};
pub use registry::TemplateRegistry;
pub use reorder::{move_item, reordered};
pub use resize::{
    ContainerSize, FrameScheduler, ResizeState, ResizeTracker, DEFAULT_COMPACT_BREAKPOINT,
};
pub use responsive::{reconcile, visible_columns, ColumnWidths, Measure, Reconciled};
pub use source::{refresh, MemoryRowSource, RowPage, RowSource};
pub use state::{initially_hidden, SortDirection, ViewState, ViewStore};
pub use store::{FileStore, MemoryStore, StateStore, StoreError};

pub use unitable_query::{JsonRow, Record, Value};
