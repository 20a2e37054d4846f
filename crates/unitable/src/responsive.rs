//! Priority-driven column hiding under width pressure.
//!
//! The engine compares the container width against the rendered width of the
//! visible columns, as reported by a [`Measure`]. When the table overflows it
//! hides the lowest-priority columns until it fits. When there is slack it
//! tries to bring back the single highest-priority hidden column, and puts it
//! away again if that makes the table overflow.
//!
//! The responsive set is separate from the user-hidden set: a column is shown
//! only if it is in neither.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::column::Column;

/// Reports the rendered width of a set of visible columns.
///
/// Hosts with a real layout pass implement this by laying the table out and
/// reading its width. Closures `FnMut(&[&Column]) -> u32` implement it too.
pub trait Measure {
    fn rendered_width(&mut self, visible: &[&Column]) -> u32;
}

impl<F> Measure for F
where
    F: FnMut(&[&Column]) -> u32,
{
    fn rendered_width(&mut self, visible: &[&Column]) -> u32 {
        self(visible)
    }
}

/// Measures by summing declared widths.
///
/// Each column contributes its `width`, else its `min_width`, else
/// `default_width`, plus `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub default_width: u32,
    pub padding: u32,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        ColumnWidths {
            default_width: 100,
            padding: 16,
        }
    }
}

impl ColumnWidths {
    pub fn width_of(&self, column: &Column) -> u32 {
        column
            .width
            .or(column.min_width)
            .unwrap_or(self.default_width)
            .saturating_add(self.padding)
    }
}

impl Measure for ColumnWidths {
    fn rendered_width(&mut self, visible: &[&Column]) -> u32 {
        visible
            .iter()
            .fold(0u32, |total, c| total.saturating_add(self.width_of(c)))
    }
}

/// What a reconcile pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Nothing to change.
    Steady,
    /// Columns hidden to relieve overflow, in the order they were hidden.
    /// `fits` is false when every eligible column is hidden and the table
    /// still overflows.
    Hid { keys: Vec<String>, fits: bool },
    /// A column came back.
    Restored(String),
    /// A column was tried and put away again.
    RolledBack(String),
}

impl Reconciled {
    /// Returns `true` if the responsive set changed.
    pub fn changed(&self) -> bool {
        matches!(self, Reconciled::Hid { .. } | Reconciled::Restored(_))
    }
}

/// Columns hidden by neither the user nor the layout engine, in sequence order.
pub fn visible_columns<'a>(
    columns: &'a [Column],
    user_hidden: &BTreeSet<String>,
    responsive_hidden: &BTreeSet<String>,
) -> Vec<&'a Column> {
    columns
        .iter()
        .filter(|c| !user_hidden.contains(&c.key) && !responsive_hidden.contains(&c.key))
        .collect()
}

/// Runs one layout pass and returns the new responsive set.
///
/// The input set is never edited; the returned set is a fresh value.
pub fn reconcile<M: Measure + ?Sized>(
    container_width: u32,
    columns: &[Column],
    user_hidden: &BTreeSet<String>,
    responsive_hidden: &BTreeSet<String>,
    measure: &mut M,
) -> (BTreeSet<String>, Reconciled) {
    let width = measure.rendered_width(&visible_columns(columns, user_hidden, responsive_hidden));

    if width > container_width {
        hide_until_fits(container_width, columns, user_hidden, responsive_hidden, measure)
    } else {
        try_restore(container_width, columns, user_hidden, responsive_hidden, measure)
    }
}

fn hide_until_fits<M: Measure + ?Sized>(
    container_width: u32,
    columns: &[Column],
    user_hidden: &BTreeSet<String>,
    responsive_hidden: &BTreeSet<String>,
    measure: &mut M,
) -> (BTreeSet<String>, Reconciled) {
    // Stable sort: equal priorities keep sequence order.
    let mut candidates = visible_columns(columns, user_hidden, responsive_hidden);
    candidates.sort_by_key(|c| c.priority);

    if candidates.is_empty() {
        return (responsive_hidden.clone(), Reconciled::Steady);
    }

    let mut next = responsive_hidden.clone();
    let mut keys = Vec::new();
    let mut fits = false;

    for column in candidates {
        next.insert(column.key.clone());
        keys.push(column.key.clone());
        log::debug!("responsive: hiding '{}' (priority {})", column.key, column.priority);

        let width = measure.rendered_width(&visible_columns(columns, user_hidden, &next));
        if width <= container_width {
            fits = true;
            break;
        }
    }

    (next, Reconciled::Hid { keys, fits })
}

fn try_restore<M: Measure + ?Sized>(
    container_width: u32,
    columns: &[Column],
    user_hidden: &BTreeSet<String>,
    responsive_hidden: &BTreeSet<String>,
    measure: &mut M,
) -> (BTreeSet<String>, Reconciled) {
    let mut hidden: Vec<&Column> = columns
        .iter()
        .filter(|c| responsive_hidden.contains(&c.key))
        .collect();
    hidden.sort_by_key(|c| Reverse(c.priority));

    let Some(column) = hidden.first() else {
        return (responsive_hidden.clone(), Reconciled::Steady);
    };

    let mut next = responsive_hidden.clone();
    next.remove(&column.key);

    let width = measure.rendered_width(&visible_columns(columns, user_hidden, &next));
    if width > container_width {
        log::trace!("responsive: '{}' does not fit yet", column.key);
        (responsive_hidden.clone(), Reconciled::RolledBack(column.key.clone()))
    } else {
        log::debug!("responsive: restoring '{}'", column.key);
        (next, Reconciled::Restored(column.key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every column is 100 wide with no padding.
    fn measure() -> ColumnWidths {
        ColumnWidths {
            default_width: 100,
            padding: 0,
        }
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").priority(10),
            Column::new("position", "Position").priority(2),
            Column::new("office", "Office").priority(1),
            Column::new("age", "Age").priority(1),
            Column::new("salary", "Salary").priority(5),
        ]
    }

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn overflow_hides_lowest_priority_first() {
        let (hidden, outcome) =
            reconcile(300, &columns(), &set(&[]), &set(&[]), &mut measure());

        assert_eq!(hidden, set(&["office", "age"]));
        assert_eq!(
            outcome,
            Reconciled::Hid {
                keys: vec!["office".into(), "age".into()],
                fits: true
            }
        );
    }

    #[test]
    fn user_hidden_columns_are_skipped() {
        let (hidden, _) =
            reconcile(300, &columns(), &set(&["age"]), &set(&[]), &mut measure());
        assert_eq!(hidden, set(&["office"]));
    }

    #[test]
    fn slack_restores_highest_priority_first() {
        let (hidden, outcome) = reconcile(
            400,
            &columns(),
            &set(&[]),
            &set(&["office", "position", "age"]),
            &mut measure(),
        );

        assert_eq!(outcome, Reconciled::Restored("position".into()));
        assert_eq!(hidden, set(&["office", "age"]));
    }

    #[test]
    fn restore_rolls_back_when_it_overflows() {
        let before = set(&["office", "age"]);
        let (hidden, outcome) = reconcile(350, &columns(), &set(&[]), &before, &mut measure());

        assert_eq!(outcome, Reconciled::RolledBack("office".into()));
        assert_eq!(hidden, before);
        assert!(!outcome.changed());
    }

    #[test]
    fn exhausting_columns_reports_overflow() {
        // 60 of chrome that no amount of hiding removes.
        let mut too_wide = |visible: &[&Column]| 60 + visible.len() as u32 * 100;
        let (hidden, outcome) = reconcile(50, &columns(), &set(&[]), &set(&[]), &mut too_wide);

        assert_eq!(hidden.len(), 5);
        assert!(matches!(outcome, Reconciled::Hid { fits: false, .. }));

        let (again, outcome) = reconcile(50, &columns(), &set(&[]), &hidden, &mut too_wide);
        assert_eq!(again, hidden);
        assert_eq!(outcome, Reconciled::Steady);
    }

    #[test]
    fn nothing_hidden_and_fits_is_steady() {
        let (hidden, outcome) =
            reconcile(1000, &columns(), &set(&[]), &set(&[]), &mut measure());
        assert!(hidden.is_empty());
        assert_eq!(outcome, Reconciled::Steady);
    }

    #[test]
    fn closures_measure() {
        let mut fixed = |visible: &[&Column]| visible.len() as u32 * 50;
        let (hidden, _) = reconcile(100, &columns(), &set(&[]), &set(&[]), &mut fixed);
        assert_eq!(hidden.len(), 3);
    }

    #[test]
    fn column_widths_prefer_declared_width() {
        let widths = ColumnWidths::default();
        assert_eq!(widths.width_of(&Column::new("a", "A").width(80).min_width(40)), 96);
        assert_eq!(widths.width_of(&Column::new("b", "B").min_width(40)), 56);
        assert_eq!(widths.width_of(&Column::new("c", "C")), 116);
    }
}
