//! Property-based tests for the grid core.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::json;
use unitable::{
    reconcile, visible_columns, Column, ColumnWidths, Grid, GridConfig, JsonRow, Measure,
    OverflowMode, PersistedSnapshot, SortDirection, ViewState,
};

// ============================================================================
// Test helpers
// ============================================================================

fn make_rows(n: usize) -> Vec<JsonRow> {
    (0..n)
        .map(|i| {
            json!({"id": i, "name": format!("name {}", i % 7)})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    GoTo(usize),
    Search(String),
    PageSize(usize),
    Rows(usize),
    Sort,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..12).prop_map(Op::GoTo),
        "[0-9 a-z]{0,3}".prop_map(Op::Search),
        (1usize..15).prop_map(Op::PageSize),
        (0usize..60).prop_map(Op::Rows),
        Just(Op::Sort),
    ]
}

fn columns_strategy() -> impl Strategy<Value = Vec<Column>> {
    prop::collection::vec((-5i32..5, 20u32..200), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (priority, width))| {
                Column::new(format!("c{}", i), format!("C{}", i))
                    .priority(priority)
                    .width(width)
            })
            .collect()
    })
}

/// Object filters plus the falsy values a host may set.
fn filter_strategy() -> impl Strategy<Value = Option<serde_json::Value>> {
    prop_oneof![
        Just(None),
        Just(Some(json!(""))),
        Just(Some(json!(0))),
        Just(Some(json!(false))),
        "[a-z]{1,5}".prop_map(|office| Some(json!({ "office": office }))),
    ]
}

fn view_state_strategy() -> impl Strategy<Value = ViewState> {
    (
        "[a-z ]{0,8}",
        1usize..100,
        prop::option::of("[a-z]{1,6}"),
        any::<bool>(),
        1usize..50,
        prop::collection::btree_set("[a-z]{1,5}", 0..4),
        filter_strategy(),
    )
        .prop_map(
            |(search_term, page_size, sort_column, desc, current_page, hidden_columns, filter)| {
                ViewState {
                    search_term,
                    page_size,
                    sort_column,
                    sort_direction: if desc {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    },
                    current_page,
                    hidden_columns,
                    external_filters: filter,
                }
            },
        )
}

fn config_strategy() -> impl Strategy<Value = GridConfig> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(0usize..200),
        prop::option::of(any::<bool>()),
        prop::option::of(prop_oneof![
            Just(OverflowMode::Visible),
            Just(OverflowMode::Scroll),
            Just(OverflowMode::Responsive),
        ]),
        prop::option::of(any::<bool>()),
        prop::option::of("[a-z]{1,8}"),
        prop::option::of(prop::collection::vec(1usize..100, 0..5)),
    )
        .prop_map(
            |(paging, page_length, responsive, overflow, server_side, storage_key, options)| {
                GridConfig {
                    paging,
                    page_length,
                    responsive,
                    overflow,
                    server_side,
                    storage_key,
                    page_length_options: options,
                    ..GridConfig::default()
                }
            },
        )
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Whatever the interaction sequence, the current page stays in range.
    #[test]
    fn current_page_is_always_valid(n in 0usize..60, ops in prop::collection::vec(op_strategy(), 1..25)) {
        let mut grid = Grid::builder()
            .config(GridConfig::new().page_length(5))
            .columns(vec![Column::new("id", "Id"), Column::new("name", "Name")])
            .rows(make_rows(n))
            .build();

        for op in ops {
            match op {
                Op::GoTo(page) => { grid.go_to_page(page); }
                Op::Search(term) => grid.search(term),
                Op::PageSize(size) => grid.set_page_size(size).unwrap(),
                Op::Rows(n) => grid.set_rows(make_rows(n)),
                Op::Sort => { grid.sort_by("name"); }
            }

            let page = grid.state().current_page;
            let total = grid.total_pages();
            prop_assert!(page >= 1);
            prop_assert!(page <= total.max(1));
            prop_assert_eq!(total, grid.total_count().div_ceil(grid.state().page_size));
        }
    }

    /// Repeated layout passes settle, and the settled layout fits.
    #[test]
    fn responsive_layout_converges(columns in columns_strategy(), container in 0u32..900) {
        let mut measure = ColumnWidths { default_width: 100, padding: 8 };
        let user_hidden = BTreeSet::new();
        let mut hidden = BTreeSet::new();
        let mut passes = 0;

        loop {
            let (next, outcome) = reconcile(container, &columns, &user_hidden, &hidden, &mut measure);
            hidden = next;
            passes += 1;
            if !outcome.changed() {
                break;
            }
            prop_assert!(passes <= 2 * columns.len() + 2, "layout did not settle");
        }

        let width = measure.rendered_width(&visible_columns(&columns, &user_hidden, &hidden));
        prop_assert!(width <= container);
    }

    /// Saving then loading reproduces the persisted fields.
    #[test]
    fn snapshot_round_trip(state in view_state_strategy()) {
        let text = PersistedSnapshot::from_state(&state).to_json().unwrap();
        let config = GridConfig::new()
            .default_sort("name", SortDirection::Desc)
            .resolve();
        let defaults = ViewState::seeded(&config, &[]);
        let restored = PersistedSnapshot::parse(&text).unwrap().restore_onto(&defaults);

        prop_assert_eq!(restored, state);
    }

    /// Resolving a resolved config changes nothing.
    #[test]
    fn resolve_is_idempotent(config in config_strategy()) {
        let once = config.resolve();
        let twice = GridConfig::from(&once).resolve();
        prop_assert_eq!(once, twice);
    }
}
